pub mod cart;
pub mod checkout;
pub mod home;
pub mod login;
pub mod orders;
pub mod products;

pub use cart::CartView;
pub use checkout::CheckoutView;
pub use home::HomeView;
pub use login::LoginView;
pub use orders::OrdersView;
pub use products::ProductsView;
