//! In-memory storage implementation.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::Result;
use crate::KvStore;

/// Process-local key-value store.
///
/// Contents are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
