use std::sync::{Arc, PoisonError, RwLock};

use crate::models::Movie;

/// Immutable snapshot of the catalog, shared with readers
pub type CatalogSnapshot = Arc<[Movie]>;

struct CatalogInner {
    movies: CatalogSnapshot,
    session_seed: u64,
}

/// Process-wide holder of the fetched movie list
///
/// The whole list is swapped atomically on every `set_movies`; readers get a
/// shared snapshot that later replacements do not affect.
pub struct CatalogStore {
    inner: RwLock<CatalogInner>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                movies: Vec::new().into(),
                session_seed: rand::random(),
            }),
        }
    }

    /// Replaces the entire catalog with `data`
    pub fn set_movies(&self, data: Vec<Movie>) {
        let count = data.len();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.movies = data.into();
        inner.session_seed = rand::random();
        tracing::info!(movies = count, "Catalog replaced");
    }

    /// Returns the current catalog, empty if never set
    pub fn get_movies(&self) -> CatalogSnapshot {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner).movies)
    }

    /// Empties the catalog
    pub fn reset(&self) {
        self.set_movies(Vec::new());
    }

    pub fn find(&self, id: &str) -> Option<Movie> {
        self.get_movies().iter().find(|m| m.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.get_movies().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Random seed drawn on the last catalog load, used for session-stable rankings
    pub fn session_seed(&self) -> u64 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .session_seed
    }
}
