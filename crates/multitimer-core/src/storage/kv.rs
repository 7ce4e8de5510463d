use std::collections::HashMap;

use crate::error::StorageError;

/// A durable string-keyed store. Values are opaque text blobs.
pub trait KvStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing whatever was there.
    fn kv_set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn kv_set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::new();
        assert!(store.kv_get("k").unwrap().is_none());
        store.kv_set("k", "1").unwrap();
        store.kv_set("k", "2").unwrap();
        assert_eq!(store.kv_get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }
}
