use anyhow::{Context, Result};
use ordered_float::OrderedFloat;
use serde::Deserialize;

use crate::domain::product::{Category, Product, ProductFilters, SortBy, SortOrder};
use crate::services::error_handling::StorefrontError;

const SEED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Deserialize)]
struct CatalogData {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// Read-only product catalog. The cart never validates against it.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// The catalog bundled with the storefront.
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED_CATALOG).context("Bundled catalog is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Ok(Self::new(data.products, data.categories))
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Product, StorefrontError> {
        self.get(id)
            .ok_or_else(|| StorefrontError::ProductNotFound { id: id.to_string() })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn by_category(&self, category_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect()
    }

    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.rating >= 4.5)
            .take(limit)
            .collect()
    }

    pub fn discounted(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_discounted())
            .take(limit)
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.matches_query(query))
            .collect()
    }

    pub fn filter(&self, filters: &ProductFilters) -> Vec<&Product> {
        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| filters.matches(p))
            .collect();

        if let Some(sort_by) = filters.sort_by {
            match sort_by {
                SortBy::Name => matches.sort_by_key(|p| p.name.to_lowercase()),
                SortBy::Price => matches.sort_by_key(|p| OrderedFloat(p.price)),
                SortBy::Rating => matches.sort_by_key(|p| OrderedFloat(p.rating)),
                SortBy::Newest => matches.sort_by_key(|p| p.created_at),
            }
            // "Newest" reads naturally descending, so asc/desc flips it too.
            let descending = match sort_by {
                SortBy::Newest => filters.sort_order == SortOrder::Asc,
                _ => filters.sort_order == SortOrder::Desc,
            };
            if descending {
                matches.reverse();
            }
        }

        matches
    }
}
