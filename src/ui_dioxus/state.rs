use dioxus::prelude::*;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::domain::order::format_currency;
use crate::repository::Repository;
use crate::services::{AuthService, CartStore, Catalog, CheckoutService, OrderExportService};
use crate::storefront::Storefront;

/// Shared handles provided to every component under [`crate::ui_dioxus::App`].
///
/// The cart and the auth session are mutable and live in signals so the
/// header badge and views re-render when they change. Everything else is
/// read-only or internally synchronized and is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<StoreConfig>,
    pub repository: Arc<Repository>,
    pub catalog: Arc<Catalog>,
    pub checkout: Arc<CheckoutService>,
    pub exports: Arc<OrderExportService>,
    pub cart: Signal<CartStore>,
    pub auth: Signal<AuthService>,
}

impl AppContext {
    pub fn new(storefront: Storefront) -> Self {
        Self {
            config: Arc::new(storefront.config),
            repository: storefront.repository,
            catalog: storefront.catalog,
            checkout: storefront.checkout,
            exports: storefront.exports,
            cart: Signal::new(storefront.cart),
            auth: Signal::new(storefront.auth),
        }
    }

    pub fn money(&self, amount: f64) -> String {
        format_currency(&self.config.currency_symbol, amount)
    }
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}
