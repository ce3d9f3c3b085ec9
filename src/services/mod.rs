pub mod auth_service;
pub mod cart_store;
pub mod catalog;
pub mod checkout_service;
pub mod error_handling;
pub mod export_service;
pub mod payment;
pub mod validation;

pub use auth_service::AuthService;
pub use cart_store::CartStore;
pub use catalog::Catalog;
pub use checkout_service::{CheckoutForm, CheckoutService};
pub use error_handling::{StorefrontError, UserErrorFormatter};
pub use export_service::{ExportFormat, OrderExportService};
pub use payment::{PaymentProcessor, SimulatedPaymentProcessor};
