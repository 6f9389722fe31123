//! In-memory session storage for tests and embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::traits::SessionStore;

/// Session store backed by an in-memory map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }

    fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ACCESS_TOKEN_KEY, USERNAME_KEY};

    #[test]
    fn test_empty_store() {
        let store = InMemorySessionStore::new();
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_with_entries() {
        let store = InMemorySessionStore::with_entries([
            (ACCESS_TOKEN_KEY, "tok-1"),
            (USERNAME_KEY, "ada"),
        ]);
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("ada"));
    }

    #[test]
    fn test_set_remove_clear() {
        let store = InMemorySessionStore::new();
        store.set(ACCESS_TOKEN_KEY, "tok");
        store.set(USERNAME_KEY, "ada");

        store.remove(ACCESS_TOKEN_KEY);
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
        assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("ada"));

        store.clear();
        assert!(store.get(USERNAME_KEY).is_none());
    }
}
