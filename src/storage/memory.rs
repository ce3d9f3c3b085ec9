use parking_lot::RwLock;
use std::collections::HashMap;

use super::{Storage, StorageError};

/// In-process storage. Used by tests and as the fallback when no durable
/// backend can be opened.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes once keys plus values would exceed
    /// `quota_bytes`, like a full browser profile.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn used_bytes_excluding(entries: &HashMap<String, String>, key: &str) -> usize {
        entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write();
        if let Some(limit) = self.quota_bytes {
            let requested = Self::used_bytes_excluding(&entries, key) + key.len() + value.len();
            if requested > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    limit,
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let storage = MemoryStorage::new();
        storage.set_item("cart", "[1]").unwrap();
        storage.set_item("cart", "[2]").unwrap();

        assert_eq!(storage.get_item("cart").unwrap(), Some("[2]".to_string()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let storage = MemoryStorage::new();
        storage.set_item("cart", "[]").unwrap();
        storage.remove_item("cart").unwrap();
        storage.remove_item("never-set").unwrap();

        assert!(storage.get_item("cart").unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_quota_exceeded() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345").unwrap();

        let err = storage.set_item("other", "123456").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert!(storage.get_item("other").unwrap().is_none());
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "123456789").unwrap();
        storage.set_item("k", "987654321").unwrap();

        assert_eq!(storage.get_item("k").unwrap(), Some("987654321".to_string()));
    }
}
