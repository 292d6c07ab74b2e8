use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{KeyValueStore, StorageKey};
use crate::error::AppResult;

/// In-memory key/value store; contents live as long as the value does
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing() {
        let store = MemoryStorage::new();
        assert_eq!(store.get(StorageKey::Watchlist), None);
    }

    #[test]
    fn test_set_replaces_value() {
        let store = MemoryStorage::new();
        store.set(StorageKey::Watchlist, "[]").unwrap();
        assert_eq!(store.get(StorageKey::Watchlist).as_deref(), Some("[]"));
        assert_eq!(store.get(StorageKey::Ratings), None);

        store.set(StorageKey::Watchlist, r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(store.get(StorageKey::Watchlist).as_deref(), Some(r#"[{"id":"1"}]"#));
    }
}
