use std::sync::Arc;

use crate::{
    config::Config,
    db::{KeyValueStore, MemoryStorage},
    services::{CatalogStore, RatingStore, WatchlistStore},
};

/// Listing parameters shared by the view handlers
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    pub page_size: usize,
    pub most_watched_limit: usize,
    pub stable_popularity: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ViewSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            most_watched_limit: config.most_watched_limit,
            stable_popularity: config.stable_popularity,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub watchlist: Arc<WatchlistStore>,
    pub ratings: Arc<RatingStore>,
    pub settings: ViewSettings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl AppState {
    /// Creates state with an empty catalog over the given durable storage
    pub fn new(storage: Arc<dyn KeyValueStore>, settings: ViewSettings) -> Self {
        Self {
            catalog: Arc::new(CatalogStore::new()),
            watchlist: Arc::new(WatchlistStore::new(storage.clone())),
            ratings: Arc::new(RatingStore::new(storage)),
            settings,
        }
    }

    /// Creates state backed by memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), ViewSettings::default())
    }
}
