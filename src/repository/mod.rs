pub mod order_repository;

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::storage::{MemoryStorage, Storage};

#[derive(Clone)]
pub struct Repository {
    pub storage: Arc<dyn Storage>,
    pub orders: order_repository::OrderRepository,
}

impl Repository {
    pub fn new(storage: Arc<dyn Storage>, config: &StoreConfig) -> Self {
        Self {
            orders: order_repository::OrderRepository::new(storage.clone(), &config.orders_key),
            storage,
        }
    }

    pub fn new_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), &StoreConfig::default())
    }
}
