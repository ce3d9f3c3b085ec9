use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::domain::order::Order;
use crate::repository::Repository;

pub struct OrderExportService {
    repository: Arc<Repository>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedOrder {
    pub id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ExportedLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
    pub ship_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
}

impl From<Order> for ExportedOrder {
    fn from(order: Order) -> Self {
        ExportedOrder {
            status: order.status.to_string(),
            created_at: order.created_at,
            items: order
                .items
                .iter()
                .map(|item| ExportedLine {
                    product_id: item.id.clone(),
                    name: item.name.clone(),
                    unit_price: item.price,
                    quantity: item.quantity,
                    line_total: item.line_total(),
                })
                .collect(),
            subtotal: order.totals.subtotal,
            tax: order.totals.tax,
            shipping: order.totals.shipping,
            total: order.totals.total,
            ship_to: order.shipping_address.one_line(),
            id: order.id,
        }
    }
}

impl OrderExportService {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }

    /// Export a user's orders to JSON, newest first
    pub fn export_to_json(&self, user_id: &str) -> Result<String> {
        let orders: Vec<ExportedOrder> = self
            .repository
            .orders
            .list_for_user(user_id)
            .into_iter()
            .map(Into::into)
            .collect();

        let json = serde_json::to_string_pretty(&orders)?;
        Ok(json)
    }

    /// Export a user's orders to CSV, one row per line item
    pub fn export_to_csv(&self, user_id: &str) -> Result<String> {
        let orders = self.repository.orders.list_for_user(user_id);

        let mut wtr = Writer::from_writer(vec![]);
        wtr.write_record([
            "Order ID",
            "Placed At",
            "Status",
            "Product ID",
            "Product",
            "Unit Price",
            "Quantity",
            "Line Total",
            "Order Total",
        ])?;

        for order in orders {
            for item in &order.items {
                wtr.write_record(&[
                    order.id.clone(),
                    order.created_at.to_rfc3339(),
                    order.status.to_string(),
                    item.id.clone(),
                    item.name.clone(),
                    format!("{:.2}", item.price),
                    item.quantity.to_string(),
                    format!("{:.2}", item.line_total()),
                    format!("{:.2}", order.totals.total),
                ])?;
            }
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }

    pub fn export_to_file(&self, user_id: &str, format: ExportFormat, path: &Path) -> Result<()> {
        let content = match format {
            ExportFormat::Json => self.export_to_json(user_id)?,
            ExportFormat::Csv => self.export_to_csv(user_id)?,
        };

        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create export file {}", path.display()))?;
        file.write_all(content.as_bytes())?;

        info!(user_id = %user_id, ?format, path = %path.display(), "Exported orders");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::LineItem;
    use crate::domain::order::{
        Address, OrderStatus, OrderTotals, PaymentKind, PaymentSummary,
    };
    use chrono::Duration;
    use tempfile::TempDir;

    fn order(id: &str, user_id: &str, items: Vec<LineItem>, minutes_ago: i64) -> Order {
        let subtotal = items.iter().map(LineItem::line_total).sum();
        Order {
            id: id.to_string(),
            user_id: user_id.to_string(),
            items,
            totals: OrderTotals::compute(subtotal, 0.08, 0.0),
            status: OrderStatus::Confirmed,
            payment: PaymentSummary {
                kind: PaymentKind::Card,
                last4: Some("4242".to_string()),
                transaction_id: "txn_test".to_string(),
            },
            shipping_address: Address {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                street: "1 Elm St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                country: "US".to_string(),
                phone: None,
            },
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn setup_test_service() -> OrderExportService {
        let repo = Arc::new(Repository::new_memory());
        repo.orders
            .append(&order(
                "ORD-OLD",
                "2",
                vec![
                    LineItem::new("prod-2", "Cotton T-Shirt", 29.99, "", "Clothing", 2),
                    LineItem::new("prod-5", "Rust, Explained", 39.99, "", "Books", 1),
                ],
                30,
            ))
            .unwrap();
        repo.orders
            .append(&order(
                "ORD-NEW",
                "2",
                vec![LineItem::new("prod-4", "Yoga Mat", 49.99, "", "Sports", 1)],
                1,
            ))
            .unwrap();
        repo.orders
            .append(&order(
                "ORD-ADMIN",
                "1",
                vec![LineItem::new("prod-1", "Headphones", 199.99, "", "Electronics", 1)],
                5,
            ))
            .unwrap();
        OrderExportService::new(repo)
    }

    #[test]
    fn test_export_to_json() {
        let service = setup_test_service();

        let json = service.export_to_json("2").unwrap();
        assert!(json.contains("\"status\": \"confirmed\""));

        let parsed: Vec<ExportedOrder> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, "ORD-NEW");
        assert_eq!(parsed[1].items.len(), 2);
        assert_eq!(parsed[1].items[0].line_total, 59.98);
        assert!(parsed[0].ship_to.contains("Springfield"));
    }

    #[test]
    fn test_export_to_csv() {
        let service = setup_test_service();

        let csv = service.export_to_csv("2").unwrap();
        assert!(csv.starts_with("Order ID,Placed At,Status,Product ID"));

        // Header + one row per line item
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(csv.contains("\"Rust, Explained\""));
        assert!(csv.contains("59.98"));
        assert!(!csv.contains("ORD-ADMIN"));
    }

    #[test]
    fn test_export_unknown_user_is_empty() {
        let service = setup_test_service();

        assert_eq!(service.export_to_json("nobody").unwrap().trim(), "[]");
        assert_eq!(service.export_to_csv("nobody").unwrap().lines().count(), 1);
    }

    #[test]
    fn test_export_to_file() {
        let service = setup_test_service();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(format!("orders.{}", ExportFormat::Csv.extension()));

        service.export_to_file("2", ExportFormat::Csv, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("ORD-NEW"));
    }
}
