use super::{Storage, StorageError};

/// `window.localStorage` for the web build.
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable {
            reason: "no global window".to_string(),
        })?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable {
                reason: format!("{:?}", e),
            })?
            .ok_or_else(|| StorageError::Unavailable {
                reason: "localStorage disabled".to_string(),
            })?;
        Ok(Self { inner })
    }
}

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(|e| StorageError::Backend {
            message: format!("{:?}", e),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Browsers report a full profile as a generic DOMException.
        self.inner.set_item(key, value).map_err(|e| StorageError::Backend {
            message: format!("{:?}", e),
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(|e| StorageError::Backend {
            message: format!("{:?}", e),
        })
    }
}
