// Test helpers for integration testing

use crate::config::StoreConfig;
use crate::domain::cart::CartProduct;
use crate::domain::user::User;
use crate::repository::Repository;
use crate::services::{AuthService, CartStore, CheckoutForm, CheckoutService, SimulatedPaymentProcessor};
use crate::services::payment::CardDetails;
use crate::storage::{MemoryStorage, Storage};
use std::sync::Arc;
use std::time::Duration;

pub struct TestContext {
    pub config: StoreConfig,
    pub storage: Arc<MemoryStorage>,
    pub repository: Arc<Repository>,
}

impl TestContext {
    pub fn new_for_test() -> Self {
        let config = StoreConfig {
            payment_delay_ms: 0,
            ..StoreConfig::default()
        };
        let storage = Arc::new(MemoryStorage::new());
        let repository = Arc::new(Repository::new(storage.clone(), &config));
        Self {
            config,
            storage,
            repository,
        }
    }

    pub fn storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub fn cart(&self) -> CartStore {
        CartStore::open(self.storage(), self.config.cart_key.as_str())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::open(self.storage(), self.config.session_key.as_str())
    }

    pub fn checkout(&self) -> CheckoutService {
        let payments = Arc::new(SimulatedPaymentProcessor::new(Duration::ZERO));
        CheckoutService::new(self.repository.clone(), payments, &self.config)
    }
}

pub fn product(id: &str, price: f64) -> CartProduct {
    CartProduct::new(id, format!("Product {}", id), price, "", "Test")
}

/// A checkout form that passes validation for `user`.
pub fn valid_checkout_form(user: &User) -> CheckoutForm {
    let mut form = CheckoutForm::for_user(user);
    form.shipping.first_name = "Jane".to_string();
    form.shipping.last_name = "Doe".to_string();
    form.shipping.street = "1 Elm St".to_string();
    form.shipping.city = "Springfield".to_string();
    form.shipping.state = "IL".to_string();
    form.shipping.zip_code = "62701".to_string();
    form.card = CardDetails {
        number: "4242 4242 4242 4242".to_string(),
        expiry: "12/30".to_string(),
        cvv: "123".to_string(),
        name_on_card: "Jane Doe".to_string(),
    };
    form
}
