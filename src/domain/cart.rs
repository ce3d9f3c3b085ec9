use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One product held in the cart.
///
/// This is exactly the shape persisted under the cart storage key, so the
/// field set must stay `{id, name, price, image, category, quantity}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            category: category.into(),
            quantity,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Prices the cart will hold: finite and non-negative. Anything else could not
/// survive a save and reload.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// Product descriptor accepted by [`CartAction::Add`]. Carries everything a
/// line item needs except the quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}

impl CartProduct {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            category: category.into(),
        }
    }

    fn into_line_item(self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            category: self.category,
            quantity,
        }
    }
}

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Add { product: CartProduct, quantity: u32 },
    Remove { product_id: String },
    UpdateQuantity { product_id: String, quantity: i64 },
    Clear,
    Load { items: Vec<LineItem> },
    /// Takes away the quantities of lines that were just ordered. Anything
    /// added since the order was snapshotted stays.
    Settle { items: Vec<LineItem> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotDefect {
    DuplicateId,
    ZeroQuantity,
    InvalidPrice,
}

impl std::fmt::Display for SnapshotDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotDefect::DuplicateId => write!(f, "duplicate product id"),
            SnapshotDefect::ZeroQuantity => write!(f, "zero quantity"),
            SnapshotDefect::InvalidPrice => write!(f, "negative or non-finite price"),
        }
    }
}

/// Ordered line items, unique by product id. Totals are always derived from
/// `items` and never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a restored snapshot for anything that would break the cart
    /// invariants before it is loaded.
    pub fn check_snapshot(items: &[LineItem]) -> Result<(), SnapshotDefect> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            if !seen.insert(item.id.as_str()) {
                return Err(SnapshotDefect::DuplicateId);
            }
            if item.quantity == 0 {
                return Err(SnapshotDefect::ZeroQuantity);
            }
            if !is_valid_price(item.price) {
                return Err(SnapshotDefect::InvalidPrice);
            }
        }
        Ok(())
    }

    /// The single state transition for the cart.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add { product, .. } if !is_valid_price(product.price) => {}
            CartAction::Add { product, quantity } => {
                // Zero is clamped so an add never produces an empty line.
                let quantity = quantity.max(1);
                match self.position(&product.id) {
                    Some(idx) => {
                        let item = &mut self.items[idx];
                        item.quantity = item.quantity.saturating_add(quantity);
                    }
                    None => self.items.push(product.into_line_item(quantity)),
                }
            }
            CartAction::Remove { product_id } => {
                self.items.retain(|item| item.id != product_id);
            }
            CartAction::UpdateQuantity { product_id, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|item| item.id != product_id);
                } else if let Some(idx) = self.position(&product_id) {
                    self.items[idx].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
            }
            CartAction::Clear => self.items.clear(),
            CartAction::Load { items } => self.items = items,
            CartAction::Settle { items } => {
                for ordered in items {
                    if let Some(idx) = self.position(&ordered.id) {
                        let left = self.items[idx].quantity.saturating_sub(ordered.quantity);
                        if left == 0 {
                            self.items.remove(idx);
                        } else {
                            self.items[idx].quantity = left;
                        }
                    }
                }
            }
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| item.quantity as u64).sum()
    }

    pub fn has_item(&self, product_id: &str) -> bool {
        self.position(product_id).is_some()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.get_item(product_id).map_or(0, |item| item.quantity)
    }

    pub fn get_item(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn product(id: &str, price: f64) -> CartProduct {
        CartProduct::new(id, format!("Product {}", id), price, "/img.png", "Misc")
    }

    fn add(cart: &mut Cart, id: &str, price: f64, quantity: u32) {
        cart.apply(CartAction::Add {
            product: product(id, price),
            quantity,
        });
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 10.0, 1);
        add(&mut cart, "p1", 10.0, 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_add_zero_quantity_is_clamped_to_one() {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 3.5, 0);

        assert_eq!(cart.quantity_of("p1"), 1);
        assert_eq!(cart.total(), 3.5);
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_add_with_unstorable_price_is_ignored(#[case] price: f64) {
        let mut cart = Cart::new();
        add(&mut cart, "ok", 10.0, 2);
        add(&mut cart, "bad", price, 1);

        assert!(!cart.has_item("bad"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), 20.0);
        assert!(Cart::check_snapshot(cart.items()).is_ok());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        add(&mut cart, "b", 1.0, 1);
        add(&mut cart, "a", 1.0, 1);
        add(&mut cart, "b", 1.0, 1);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn test_update_non_positive_removes(#[case] quantity: i64) {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 10.0, 2);
        add(&mut cart, "p2", 5.0, 1);

        let mut removed = cart.clone();
        removed.apply(CartAction::Remove {
            product_id: "p1".to_string(),
        });

        cart.apply(CartAction::UpdateQuantity {
            product_id: "p1".to_string(),
            quantity,
        });

        assert_eq!(cart, removed);
        assert!(!cart.has_item("p1"));
    }

    #[test]
    fn test_update_sets_rather_than_increments() {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 10.0, 2);
        cart.apply(CartAction::UpdateQuantity {
            product_id: "p1".to_string(),
            quantity: 5,
        });

        assert_eq!(cart.quantity_of("p1"), 5);
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 10.0, 2);
        let before = cart.clone();

        cart.apply(CartAction::UpdateQuantity {
            product_id: "missing".to_string(),
            quantity: 3,
        });
        assert_eq!(cart, before);

        cart.apply(CartAction::Remove {
            product_id: "missing".to_string(),
        });
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 10.0, 2);
        cart.apply(CartAction::Clear);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_get_item_and_missing_quantity() {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 2.0, 4);

        assert_eq!(cart.get_item("p1").map(|i| i.line_total()), Some(8.0));
        assert!(cart.get_item("p2").is_none());
        assert_eq!(cart.quantity_of("p2"), 0);
    }

    #[rstest]
    #[case(vec![LineItem::new("a", "A", 1.0, "", "", 1), LineItem::new("a", "A", 1.0, "", "", 2)], SnapshotDefect::DuplicateId)]
    #[case(vec![LineItem::new("a", "A", 1.0, "", "", 0)], SnapshotDefect::ZeroQuantity)]
    #[case(vec![LineItem::new("a", "A", -1.0, "", "", 1)], SnapshotDefect::InvalidPrice)]
    #[case(vec![LineItem::new("a", "A", f64::NAN, "", "", 1)], SnapshotDefect::InvalidPrice)]
    fn test_check_snapshot_rejects_broken_snapshots(
        #[case] items: Vec<LineItem>,
        #[case] expected: SnapshotDefect,
    ) {
        assert_eq!(Cart::check_snapshot(&items), Err(expected));
    }

    #[test]
    fn test_settle_keeps_lines_added_after_the_order() {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 10.0, 2);
        add(&mut cart, "p2", 5.0, 1);
        let ordered = cart.items().to_vec();

        add(&mut cart, "p1", 10.0, 1);
        add(&mut cart, "p3", 1.0, 4);
        cart.apply(CartAction::Settle { items: ordered });

        assert_eq!(cart.quantity_of("p1"), 1);
        assert!(!cart.has_item("p2"));
        assert_eq!(cart.quantity_of("p3"), 4);
        assert_eq!(cart.items()[0].id, "p1");
        assert_eq!(cart.total(), 14.0);
    }

    #[test]
    fn test_settle_after_removal_is_noop() {
        let mut cart = Cart::new();
        add(&mut cart, "p1", 10.0, 2);
        let ordered = cart.items().to_vec();
        cart.apply(CartAction::Remove {
            product_id: "p1".to_string(),
        });

        cart.apply(CartAction::Settle { items: ordered });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_load_replaces_items() {
        let mut cart = Cart::new();
        add(&mut cart, "old", 1.0, 1);

        let items = vec![
            LineItem::new("a", "A", 2.0, "", "", 2),
            LineItem::new("b", "B", 3.0, "", "", 1),
        ];
        assert_eq!(Cart::check_snapshot(&items), Ok(()));
        cart.apply(CartAction::Load { items });

        assert!(!cart.has_item("old"));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 7.0);
    }

    #[test]
    fn test_line_item_serializes_with_storage_field_names() {
        let item = LineItem::new("p1", "Mug", 12.5, "/mug.png", "Kitchen", 3);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": "p1",
                "name": "Mug",
                "price": 12.5,
                "image": "/mug.png",
                "category": "Kitchen",
                "quantity": 3
            })
        );
    }
}
