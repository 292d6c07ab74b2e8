pub mod file;
pub mod memory;

use serde::de::DeserializeOwned;
use std::fmt::Display;

use crate::error::AppResult;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Fixed keys of the durable key/value store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Watchlist,
    Ratings,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Watchlist => write!(f, "watchlist"),
            StorageKey::Ratings => write!(f, "ratings"),
        }
    }
}

/// Durable string key/value storage backing the watchlist and ratings
///
/// Reads never fail: a value that cannot be read is reported as absent.
/// Writes replace the whole value for a key.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Option<String>;

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Decodes the JSON value stored under `key`
///
/// A missing key or a payload that does not parse as `T` yields `T::default()`.
pub fn load_json<T>(store: &dyn KeyValueStore, key: StorageKey) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key) else {
        tracing::debug!(key = %key, backend = store.name(), "Storage miss");
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                key = %key,
                backend = store.name(),
                error = %e,
                "Discarding malformed stored value"
            );
            T::default()
        }
    }
}

/// Encodes `value` as JSON and stores it under `key`
pub fn save_json<T>(store: &dyn KeyValueStore, key: StorageKey, value: &T) -> AppResult<()>
where
    T: serde::Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)?;
    tracing::debug!(key = %key, backend = store.name(), bytes = json.len(), "Storage write");
    Ok(())
}
