pub mod catalog;
pub mod ingestion;
pub mod listing;
pub mod popularity;
pub mod providers;
pub mod ratings;
pub mod title_search;
pub mod watchlist;

pub use catalog::{CatalogSnapshot, CatalogStore};
pub use ingestion::ingest_catalog;
pub use listing::{paginate, top_rated, Pager};
pub use popularity::{most_watched, rank_by_popularity, MostWatchedEntry};
pub use ratings::RatingStore;
pub use title_search::search_by_title;
pub use watchlist::WatchlistStore;
