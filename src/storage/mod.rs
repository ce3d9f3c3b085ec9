//! Client-side key/value persistence.
//!
//! The storefront keeps its durable state (cart snapshot, order history,
//! session) under a handful of string keys, mirroring browser local storage.
//! Backends only move strings; JSON encoding lives in [`read_json`] and
//! [`write_json`].

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod browser;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Storage quota exceeded writing {key} ({requested} bytes, limit {limit})")]
    QuotaExceeded {
        key: String,
        requested: usize,
        limit: usize,
    },

    #[error("I/O error on key {key}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage backend error: {message}")]
    Backend { message: String },
}

#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites any previous value under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and decodes the value under `key`. `Ok(None)` means the key is absent.
pub fn read_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    let Some(raw) = storage
        .get_item(key)
        .with_context(|| format!("Failed to read storage key '{}'", key))?
    else {
        return Ok(None);
    };

    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed JSON under storage key '{}'", key))?;
    Ok(Some(value))
}

pub fn write_json<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to encode value for storage key '{}'", key))?;
    storage
        .set_item(key, &raw)
        .with_context(|| format!("Failed to write storage key '{}'", key))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_read_json_absent_key() {
        let storage = MemoryStorage::new();
        let value: Option<Vec<u32>> = read_json(&storage, "missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_read_json_malformed() {
        let storage = MemoryStorage::new();
        storage.set_item("cart", "{not json").unwrap();

        let err = read_json::<Vec<u32>>(&storage, "cart").unwrap_err();
        assert!(err.to_string().contains("Malformed JSON"));
    }

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        write_json(&storage, "numbers", &vec![1, 2, 3]).unwrap();

        let value: Option<Vec<u32>> = read_json(&storage, "numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_write_json_surfaces_backend_error() {
        let mut storage = MockStorage::new();
        storage
            .expect_set_item()
            .with(eq("orders"), eq("[]"))
            .times(1)
            .returning(|_, _| {
                Err(StorageError::Backend {
                    message: "disk full".to_string(),
                })
            });

        let err = write_json(&storage, "orders", &Vec::<u32>::new()).unwrap_err();
        assert!(err.downcast_ref::<StorageError>().is_some());
    }
}
