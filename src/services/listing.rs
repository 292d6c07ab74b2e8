use std::cmp::Ordering;

use crate::models::Movie;

/// Home feed page size
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Returns the first `page_size * page_count` movies, capped at the catalog length
pub fn paginate(movies: &[Movie], page_size: usize, page_count: usize) -> &[Movie] {
    let visible = page_size.saturating_mul(page_count).min(movies.len());
    &movies[..visible]
}

/// "Load more" state of a paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    total: usize,
    visible: usize,
}

impl Pager {
    /// Starts with the first page visible
    pub fn new(page_size: usize, total: usize) -> Self {
        Self {
            page_size,
            total,
            visible: page_size.min(total),
        }
    }

    /// Pager positioned after `page_count` pages
    pub fn with_pages(page_size: usize, total: usize, page_count: usize) -> Self {
        Self {
            page_size,
            total,
            visible: page_size.saturating_mul(page_count).min(total),
        }
    }

    /// Reveals one more page; never exceeds the total
    pub fn load_more(&mut self) -> usize {
        self.visible = self.visible.saturating_add(self.page_size).min(self.total);
        self.visible
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.total
    }

    pub fn remaining(&self) -> usize {
        self.total - self.visible
    }

    pub fn slice<'a>(&self, movies: &'a [Movie]) -> &'a [Movie] {
        &movies[..self.visible.min(movies.len())]
    }
}

/// Orders movies by IMDb rating, highest first
///
/// The rating is compared by the numeric value of its display string; movies
/// without a numeric rating go last. Ties keep catalog order.
pub fn top_rated(movies: &[Movie]) -> Vec<&Movie> {
    let mut ranked: Vec<(Option<f64>, &Movie)> = movies
        .iter()
        .map(|m| (numeric_rating(m), m))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    ranked.into_iter().map(|(_, m)| m).collect()
}

fn numeric_rating(movie: &Movie) -> Option<f64> {
    movie
        .imdb_rating
        .as_deref()
        .and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite())
}
