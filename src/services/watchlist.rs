use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    db::{self, KeyValueStore, StorageKey},
    error::{AppError, AppResult},
    models::Movie,
};

/// Durable, ordered set of saved movies keyed by id
///
/// Every operation reads the stored list, applies its change and writes it
/// back while holding the store lock.
pub struct WatchlistStore {
    storage: Arc<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl WatchlistStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    /// Reads the stored watchlist; absent or malformed data yields an empty list
    pub fn load(&self) -> Vec<Movie> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read()
    }

    /// Appends a copy of `movie` unless a movie with the same id is present
    pub fn add(&self, movie: &Movie) -> AppResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut watchlist = self.read();

        if watchlist.iter().any(|m| m.id == movie.id) {
            tracing::debug!(movie_id = %movie.id, "Movie already in watchlist");
            return Err(AppError::AlreadyExists(movie.id.clone()));
        }

        watchlist.push(movie.clone());
        db::save_json(self.storage.as_ref(), StorageKey::Watchlist, &watchlist)?;

        tracing::info!(
            movie_id = %movie.id,
            title = %movie.title,
            size = watchlist.len(),
            "Added to watchlist"
        );
        Ok(())
    }

    /// Removes any entry with `id` and returns the updated list
    pub fn remove(&self, id: &str) -> AppResult<Vec<Movie>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut watchlist = self.read();

        let before = watchlist.len();
        watchlist.retain(|m| m.id != id);
        db::save_json(self.storage.as_ref(), StorageKey::Watchlist, &watchlist)?;

        tracing::info!(
            movie_id = %id,
            removed = before - watchlist.len(),
            size = watchlist.len(),
            "Removed from watchlist"
        );
        Ok(watchlist)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Saved snapshot of the movie with `id`
    pub fn find(&self, id: &str) -> Option<Movie> {
        self.load().into_iter().find(|m| m.id == id)
    }

    fn read(&self) -> Vec<Movie> {
        db::load_json(self.storage.as_ref(), StorageKey::Watchlist)
    }
}
