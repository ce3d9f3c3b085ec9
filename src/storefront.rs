use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::repository::Repository;
use crate::services::{
    AuthService, CartStore, Catalog, CheckoutService, OrderExportService,
    SimulatedPaymentProcessor,
};
use crate::storage::{MemoryStorage, Storage};

/// Everything one storefront session needs, wired against a single storage
/// backend.
pub struct Storefront {
    pub config: StoreConfig,
    pub repository: Arc<Repository>,
    pub catalog: Arc<Catalog>,
    pub cart: CartStore,
    pub auth: AuthService,
    pub checkout: Arc<CheckoutService>,
    pub exports: Arc<OrderExportService>,
}

impl Storefront {
    /// Opens the storefront on the platform's default storage: browser
    /// local storage on the web, files under `config.data_dir` elsewhere.
    /// Falls back to in-memory storage when neither is usable.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let storage = default_storage(&config);
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: StoreConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        let repository = Arc::new(Repository::new(storage.clone(), &config));
        let catalog = Arc::new(Catalog::seeded()?);
        let payments = Arc::new(SimulatedPaymentProcessor::new(Duration::from_millis(
            config.payment_delay_ms,
        )));

        let storefront = Self {
            cart: CartStore::open(storage.clone(), config.cart_key.as_str()),
            auth: AuthService::open(storage, config.session_key.as_str()),
            checkout: Arc::new(CheckoutService::new(repository.clone(), payments, &config)),
            exports: Arc::new(OrderExportService::new(repository.clone())),
            catalog,
            repository,
            config,
        };

        info!(
            products = storefront.catalog.all().len(),
            cart_items = storefront.cart.item_count(),
            signed_in = storefront.auth.is_authenticated(),
            "Storefront ready"
        );
        Ok(storefront)
    }

    pub fn in_memory(config: StoreConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(MemoryStorage::new()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_storage(config: &StoreConfig) -> Arc<dyn Storage> {
    match crate::storage::FileStorage::open(&config.data_dir) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            warn!(error = %e, "File storage unavailable, cart will not survive a restart");
            Arc::new(MemoryStorage::new())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn default_storage(_config: &StoreConfig) -> Arc<dyn Storage> {
    match crate::storage::BrowserStorage::local() {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            warn!(error = %e, "localStorage unavailable, cart will not survive a reload");
            Arc::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartProduct;
    use tempfile::TempDir;

    #[test]
    fn test_open_on_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig {
            data_dir: dir.path().join("data"),
            ..StoreConfig::default()
        };

        let mut store = Storefront::open(config.clone()).unwrap();
        store
            .cart
            .add(CartProduct::new("prod-2", "T-Shirt", 29.99, "", "Clothing"), 2);
        assert!(store.cart.is_persisted());
        drop(store);

        let reopened = Storefront::open(config).unwrap();
        assert_eq!(reopened.cart.quantity_of("prod-2"), 2);
    }

    #[test]
    fn test_in_memory_starts_empty() {
        let store = Storefront::in_memory(StoreConfig::default()).unwrap();

        assert!(store.cart.is_empty());
        assert!(!store.auth.is_authenticated());
        assert_eq!(store.catalog.all().len(), 7);
        assert!(store.repository.orders.list_all().is_empty());
    }
}
