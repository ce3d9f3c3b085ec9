use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartProduct;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    pub image: String,
    pub category: String,
    pub category_id: String,
    pub brand: String,
    pub rating: f32,
    pub review_count: u32,
    pub in_stock: bool,
    pub stock_quantity: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }

    /// Percentage off the original price, rounded down.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original <= self.price || original <= 0.0 {
            return None;
        }
        Some((((original - self.price) / original) * 100.0).floor() as u32)
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }

    /// The descriptor the cart keeps for this product.
    pub fn to_cart_product(&self) -> CartProduct {
        CartProduct::new(
            self.id.clone(),
            self.name.clone(),
            self.price,
            self.image.clone(),
            self.category.clone(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Name,
    Price,
    Rating,
    Newest,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductFilters {
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f32>,
    pub in_stock_only: bool,
    pub query: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: SortOrder,
}

impl ProductFilters {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category_id) = &self.category_id {
            if &product.category_id != category_id {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.min_rating.is_some_and(|min| product.rating < min) {
            return false;
        }
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        if let Some(query) = self.query.as_deref().filter(|q| !q.trim().is_empty()) {
            return product.matches_query(query.trim());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_product() -> Product {
        Product {
            id: "prod-1".to_string(),
            name: "Wireless Bluetooth Headphones".to_string(),
            description: "Noise-cancelling headphones".to_string(),
            price: 199.99,
            original_price: Some(249.99),
            image: "/headphones.jpg".to_string(),
            category: "Electronics".to_string(),
            category_id: "cat-1".to_string(),
            brand: "AudioTech".to_string(),
            rating: 4.5,
            review_count: 128,
            in_stock: true,
            stock_quantity: 45,
            tags: vec!["wireless".to_string(), "bluetooth".to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_discount() {
        let mut product = sample_product();
        assert!(product.is_discounted());
        assert_eq!(product.discount_percent(), Some(20));

        product.original_price = None;
        assert!(!product.is_discounted());
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let product = sample_product();
        assert!(product.matches_query("HEADPHONES"));
        assert!(product.matches_query("bluetooth"));
        assert!(!product.matches_query("yoga"));
    }

    #[test]
    fn test_filters() {
        let product = sample_product();
        let mut filters = ProductFilters::default();
        assert!(filters.matches(&product));

        filters.max_price = Some(100.0);
        assert!(!filters.matches(&product));

        filters.max_price = None;
        filters.category_id = Some("cat-2".to_string());
        assert!(!filters.matches(&product));

        filters.category_id = Some("cat-1".to_string());
        filters.min_rating = Some(4.0);
        filters.query = Some("noise".to_string());
        assert!(filters.matches(&product));
    }

    #[test]
    fn test_to_cart_product() {
        let product = sample_product();
        let cart_product = product.to_cart_product();
        assert_eq!(cart_product.id, "prod-1");
        assert_eq!(cart_product.price, 199.99);
        assert_eq!(cart_product.category, "Electronics");
    }
}
