use crate::models::Movie;

/// Case-insensitive substring search over movie titles
///
/// An empty query matches every movie. Results keep catalog order.
pub fn search_by_title<'a>(movies: &'a [Movie], query: &str) -> Vec<&'a Movie> {
    if query.is_empty() {
        return movies.iter().collect();
    }

    let needle = query.to_lowercase();
    movies
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}
