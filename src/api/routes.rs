use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Listings
        .route("/movies", get(handlers::home))
        .route("/movies/top-rated", get(handlers::top_rated))
        .route("/movies/most-watched", get(handlers::most_watched))
        .route("/movies/:id", get(handlers::movie_detail))
        .route("/search", get(handlers::search))
        // Watchlist
        .route(
            "/watchlist",
            get(handlers::get_watchlist).post(handlers::add_to_watchlist),
        )
        .route(
            "/watchlist/:id",
            get(handlers::watchlist_contains).delete(handlers::remove_from_watchlist),
        )
        // Ratings
        .route("/ratings", get(handlers::get_ratings))
        .route(
            "/ratings/:id",
            get(handlers::get_rating).put(handlers::rate_movie),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
