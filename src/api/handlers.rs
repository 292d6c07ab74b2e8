use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Movie, Rating};
use crate::services::{listing, popularity, title_search, MostWatchedEntry, Pager};

use super::AppState;

// Request/Response types

/// A movie as shown in a listing, with its display poster resolved
#[derive(Debug, Serialize)]
pub struct MovieCard {
    #[serde(flatten)]
    pub movie: Movie,
    pub poster_url: String,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        Self {
            movie: movie.clone(),
            poster_url: movie.poster_url().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub movies: usize,
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub pages: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub movies: Vec<MovieCard>,
    pub total: usize,
    pub showing: usize,
    pub has_more: bool,
    pub remaining: usize,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub movies: Vec<MovieCard>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MostWatchedResponse {
    pub movies: Vec<MostWatchedEntry>,
    pub total: usize,
}

/// Detail fields with their display fallbacks applied
#[derive(Debug, Serialize)]
pub struct MovieDisplay {
    pub rating: String,
    pub year: String,
    pub runtime: String,
    pub plot: String,
}

impl From<&Movie> for MovieDisplay {
    fn from(movie: &Movie) -> Self {
        Self {
            rating: movie.rating_label().to_string(),
            year: movie.year_label(),
            runtime: movie.runtime_label().to_string(),
            plot: movie.plot_label().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    pub movie: MovieCard,
    pub display: MovieDisplay,
    pub user_rating: Option<Rating>,
    pub in_watchlist: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub movies: Vec<MovieCard>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub id: String,
    pub in_watchlist: bool,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub id: String,
    pub rating: Option<Rating>,
}

// Handlers

// Store writes hit blocking storage, so they run off the async workers.
async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        movies: state.catalog.len(),
    })
}

/// Home feed: the first `pages` pages of the catalog
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<HomeQuery>,
) -> Json<HomeResponse> {
    let movies = state.catalog.get_movies();
    let pages = params.pages.unwrap_or(1).max(1);
    let pager = Pager::with_pages(state.settings.page_size, movies.len(), pages);

    Json(HomeResponse {
        movies: pager.slice(&movies).iter().map(MovieCard::from).collect(),
        total: movies.len(),
        showing: pager.visible(),
        has_more: pager.has_more(),
        remaining: pager.remaining(),
    })
}

/// Catalog ordered by IMDb rating
pub async fn top_rated(State(state): State<AppState>) -> Json<ListingResponse> {
    let movies = state.catalog.get_movies();
    let ranked = listing::top_rated(&movies);

    Json(ListingResponse {
        total: ranked.len(),
        movies: ranked.into_iter().map(MovieCard::from).collect(),
    })
}

/// Most watched listing with simulated view counts
pub async fn most_watched(State(state): State<AppState>) -> Json<MostWatchedResponse> {
    let movies = state.catalog.get_movies();
    let seed = state
        .settings
        .stable_popularity
        .then(|| state.catalog.session_seed());
    let mut rng = popularity::ranking_rng(seed);

    let entries = popularity::most_watched(&movies, state.settings.most_watched_limit, &mut rng);

    Json(MostWatchedResponse {
        total: movies.len(),
        movies: entries,
    })
}

/// Movie detail with the user's rating and watchlist membership
///
/// Saved watchlist snapshots are shown even when the catalog no longer
/// carries the movie.
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieDetailResponse>> {
    let movie = state
        .catalog
        .find(&id)
        .or_else(|| state.watchlist.find(&id))
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(Json(MovieDetailResponse {
        movie: MovieCard::from(&movie),
        display: MovieDisplay::from(&movie),
        user_rating: state.ratings.get_rating(&id),
        in_watchlist: state.watchlist.contains(&id),
    }))
}

/// Case-insensitive title search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let movies = state.catalog.get_movies();
    let results = title_search::search_by_title(&movies, &params.query);

    tracing::debug!(query = %params.query, results = results.len(), "Title search");

    Json(SearchResponse {
        count: results.len(),
        movies: results.into_iter().map(MovieCard::from).collect(),
        query: params.query,
    })
}

/// Get the watchlist in insertion order
pub async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.watchlist.load())
}

/// Add a movie snapshot to the watchlist
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    if movie.id.is_empty() || movie.title.is_empty() {
        return Err(AppError::InvalidInput(
            "Movie id and title are required".to_string(),
        ));
    }

    let watchlist = Arc::clone(&state.watchlist);
    let snapshot = movie.clone();
    run_blocking(move || watchlist.add(&snapshot)).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Check whether a movie is in the watchlist
pub async fn watchlist_contains(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<MembershipResponse> {
    let in_watchlist = state.watchlist.contains(&id);
    Json(MembershipResponse { id, in_watchlist })
}

/// Remove a movie from the watchlist
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Movie>>> {
    let store = Arc::clone(&state.watchlist);
    let watchlist = run_blocking(move || store.remove(&id)).await?;
    Ok(Json(watchlist))
}

/// Get all personal ratings
pub async fn get_ratings(State(state): State<AppState>) -> Json<BTreeMap<String, Rating>> {
    Json(state.ratings.load())
}

/// Get the personal rating for one movie
pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<RatingResponse> {
    let rating = state.ratings.get_rating(&id);
    Json(RatingResponse { id, rating })
}

/// Save the personal rating for one movie
pub async fn rate_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RateRequest>,
) -> AppResult<Json<RatingResponse>> {
    let rating = request
        .rating
        .ok_or_else(|| AppError::InvalidInput("Please select a rating".to_string()))?;

    let ratings = Arc::clone(&state.ratings);
    let movie_id = id.clone();
    let rating = run_blocking(move || ratings.set_rating(&movie_id, rating)).await?;

    Ok(Json(RatingResponse {
        id,
        rating: Some(rating),
    }))
}
