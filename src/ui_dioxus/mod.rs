// Dioxus UI module - routes, shared state and views for the storefront
pub mod app;
pub mod components;
pub mod router;
pub mod state;
pub mod views;

pub use app::App;
