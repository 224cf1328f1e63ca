//! # Session Store
//!
//! Key/value collaborator behind persisted filter state. Last-write-wins per
//! key; no cross-key ordering guarantees are required.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Cross-request key/value storage
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn forget(&self, key: &str);
}

/// Process-local store, suitable for tests and single-node deployments
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn forget(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_forget() {
        let store = MemorySessionStore::new();

        assert_eq!(store.get("filters.users"), None);

        store.put("filters.users", "/users?name=a");
        assert_eq!(store.get("filters.users"), Some("/users?name=a".to_string()));

        store.forget("filters.users");
        assert_eq!(store.get("filters.users"), None);
    }

    #[test]
    fn test_overwrite_is_last_write_wins() {
        let store = MemorySessionStore::new();
        store.put("k", "first");
        store.put("k", "second");
        assert_eq!(store.get("k"), Some("second".to_string()));
    }
}
