pub mod cart_items;
pub mod cart_summary;
pub mod export_button;
pub mod form_field;
pub mod header;
pub mod product_card;

pub use cart_items::CartItemRow;
pub use cart_summary::CartSummary;
pub use export_button::ExportButton;
pub use form_field::FormField;
pub use header::Header;
pub use product_card::{ProductCard, ProductGrid};
