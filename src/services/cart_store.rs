use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::cart::{Cart, CartAction, CartProduct, LineItem, is_valid_price};
use crate::services::error_handling::LogHelper;
use crate::storage::{Storage, read_json, write_json};

/// The session's cart, kept in sync with persistent storage.
///
/// Every mutation goes through [`CartStore::dispatch`], which applies the
/// action and then writes the full item list under the store's key. A failed
/// write is logged and the in-memory change stands.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn Storage>,
    key: String,
    persisted: bool,
}

impl CartStore {
    /// Restores the cart saved under `key`, or starts empty if nothing usable
    /// is there.
    pub fn open(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut cart = Cart::new();

        if let Some(items) = restore_items(storage.as_ref(), &key) {
            cart.apply(CartAction::Load { items });
            info!(
                key = %key,
                lines = cart.len(),
                item_count = cart.item_count(),
                "Restored cart"
            );
        }

        Self {
            cart,
            storage,
            key,
            persisted: true,
        }
    }

    pub fn dispatch(&mut self, action: CartAction) {
        if let CartAction::Add { product, .. } = &action {
            if !is_valid_price(product.price) {
                LogHelper::log_validation_failure("price", "negative or non-finite price");
                return;
            }
        }
        let (operation, product_id) = describe(&action);
        self.cart.apply(action);
        LogHelper::log_cart_operation(operation, product_id.as_deref(), self.cart.item_count());
        self.persist();
    }

    pub fn add(&mut self, product: CartProduct, quantity: u32) {
        self.dispatch(CartAction::Add { product, quantity });
    }

    pub fn add_one(&mut self, product: CartProduct) {
        self.add(product, 1);
    }

    /// Sets the quantity of `product_id`; zero or below removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            product_id: product_id.to_string(),
            quantity,
        });
    }

    pub fn remove(&mut self, product_id: &str) {
        self.dispatch(CartAction::Remove {
            product_id: product_id.to_string(),
        });
    }

    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Removes what an order took out of the cart, keeping later additions.
    pub fn settle(&mut self, ordered: &[LineItem]) {
        self.dispatch(CartAction::Settle {
            items: ordered.to_vec(),
        });
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn has_item(&self, product_id: &str) -> bool {
        self.cart.has_item(product_id)
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.cart.quantity_of(product_id)
    }

    pub fn get_item(&self, product_id: &str) -> Option<&LineItem> {
        self.cart.get_item(product_id)
    }

    /// False when the latest write to storage failed, so the visible cart
    /// will not survive a reload.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    fn persist(&mut self) {
        match write_json(self.storage.as_ref(), &self.key, self.cart.items()) {
            Ok(()) => {
                self.persisted = true;
                debug!(key = %self.key, lines = self.cart.len(), "Cart persisted");
            }
            Err(e) => {
                self.persisted = false;
                LogHelper::log_error_with_context("persist cart", &e);
            }
        }
    }
}

fn restore_items(storage: &dyn Storage, key: &str) -> Option<Vec<LineItem>> {
    match read_json::<Vec<LineItem>>(storage, key) {
        Ok(Some(items)) => match Cart::check_snapshot(&items) {
            Ok(()) => Some(items),
            Err(defect) => {
                warn!(key = %key, defect = %defect, "Discarding corrupt cart snapshot");
                None
            }
        },
        Ok(None) => {
            debug!(key = %key, "No saved cart, starting empty");
            None
        }
        Err(e) => {
            LogHelper::log_error_with_context("restore cart", &e);
            None
        }
    }
}

fn describe(action: &CartAction) -> (&'static str, Option<String>) {
    match action {
        CartAction::Add { product, .. } => ("add", Some(product.id.clone())),
        CartAction::Remove { product_id } => ("remove", Some(product_id.clone())),
        CartAction::UpdateQuantity { product_id, .. } => {
            ("update_quantity", Some(product_id.clone()))
        }
        CartAction::Clear => ("clear", None),
        CartAction::Load { .. } => ("load", None),
        CartAction::Settle { .. } => ("settle", None),
    }
}
