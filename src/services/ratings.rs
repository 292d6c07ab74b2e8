use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::{
    db::{self, KeyValueStore, StorageKey},
    error::AppResult,
    models::Rating,
};

/// Durable mapping from movie id to the user's rating
pub struct RatingStore {
    storage: Arc<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl RatingStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    /// Reads stored ratings; absent or malformed data yields an empty map
    pub fn load(&self) -> BTreeMap<String, Rating> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read()
    }

    pub fn get_rating(&self, id: &str) -> Option<Rating> {
        self.load().get(id).copied()
    }

    /// Stores `rating` for `id`, replacing any earlier rating
    pub fn set_rating(&self, id: &str, rating: i64) -> AppResult<Rating> {
        let rating = Rating::try_from(rating)?;

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut ratings = self.read();
        let previous = ratings.insert(id.to_string(), rating);
        db::save_json(self.storage.as_ref(), StorageKey::Ratings, &ratings)?;

        tracing::info!(
            movie_id = %id,
            rating = rating.value(),
            previous = previous.map(Rating::value),
            "Rating saved"
        );
        Ok(rating)
    }

    // Entries outside 1..=10 are dropped individually.
    fn read(&self) -> BTreeMap<String, Rating> {
        let raw: BTreeMap<String, Value> =
            db::load_json(self.storage.as_ref(), StorageKey::Ratings);

        raw.into_iter()
            .filter_map(|(id, value)| {
                let rating = value.as_i64().and_then(|v| Rating::try_from(v).ok());
                if rating.is_none() {
                    tracing::warn!(movie_id = %id, value = %value, "Dropping invalid stored rating");
                }
                rating.map(|r| (id, r))
            })
            .collect()
    }
}
