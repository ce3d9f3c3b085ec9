use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::domain::order::Order;
use crate::services::error_handling::LogHelper;
use crate::storage::{Storage, StorageError, read_json, write_json};

/// Order history kept as one JSON array under a single storage key.
#[derive(Clone)]
pub struct OrderRepository {
    storage: Arc<dyn Storage>,
    key: String,
}

impl OrderRepository {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Every recorded order, oldest first. Unreadable history counts as empty.
    pub fn list_all(&self) -> Vec<Order> {
        self.load_history().unwrap_or_else(|e| {
            LogHelper::log_error_with_context("load order history", &e);
            Vec::new()
        })
    }

    /// Orders placed by `user_id`, newest first.
    pub fn list_for_user(&self, user_id: &str) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .list_all()
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    pub fn get(&self, id: &str) -> Option<Order> {
        self.list_all().into_iter().find(|o| o.id == id)
    }

    /// Fails without writing when the backend cannot be read, so a transient
    /// read error never replaces the stored history.
    pub fn append(&self, order: &Order) -> Result<()> {
        let mut orders = self.load_history()?;
        orders.push(order.clone());
        write_json(self.storage.as_ref(), &self.key, &orders)?;
        debug!(order_id = %order.id, total_orders = orders.len(), "Order recorded");
        Ok(())
    }

    /// Malformed history reads as empty; backend failures are returned.
    fn load_history(&self) -> Result<Vec<Order>> {
        match read_json::<Vec<Order>>(self.storage.as_ref(), &self.key) {
            Ok(orders) => Ok(orders.unwrap_or_default()),
            Err(e) if e.downcast_ref::<StorageError>().is_some() => Err(e),
            Err(e) => {
                LogHelper::log_error_with_context("discard corrupt order history", &e);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::LineItem;
    use crate::domain::order::{Address, OrderStatus, OrderTotals, PaymentKind, PaymentSummary};
    use crate::storage::{MemoryStorage, MockStorage};
    use chrono::{Duration, Utc};
    use mockall::Sequence;
    use mockall::predicate::eq;

    fn order(id: &str, user_id: &str, minutes_ago: i64) -> Order {
        Order {
            id: id.to_string(),
            user_id: user_id.to_string(),
            items: vec![LineItem::new("prod-2", "T-Shirt", 29.99, "", "Clothing", 2)],
            totals: OrderTotals::compute(59.98, 0.08, 0.0),
            status: OrderStatus::Confirmed,
            payment: PaymentSummary {
                kind: PaymentKind::Card,
                last4: Some("4242".to_string()),
                transaction_id: "txn_test".to_string(),
            },
            shipping_address: Address::default(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn repository() -> (Arc<MemoryStorage>, OrderRepository) {
        let storage = Arc::new(MemoryStorage::new());
        let repo = OrderRepository::new(storage.clone(), "orders");
        (storage, repo)
    }

    #[test]
    fn test_append_and_get() {
        let (_, repo) = repository();
        repo.append(&order("ORD-1", "2", 0)).unwrap();

        let loaded = repo.get("ORD-1").unwrap();
        assert_eq!(loaded.user_id, "2");
        assert_eq!(loaded.item_count(), 2);
        assert!(repo.get("ORD-404").is_none());
    }

    #[test]
    fn test_list_for_user_newest_first() {
        let (_, repo) = repository();
        repo.append(&order("old", "2", 60)).unwrap();
        repo.append(&order("other-user", "1", 5)).unwrap();
        repo.append(&order("new", "2", 1)).unwrap();

        let ids: Vec<String> = repo.list_for_user("2").into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(repo.list_all().len(), 3);
    }

    #[test]
    fn test_corrupt_history_reads_empty() {
        let (storage, repo) = repository();
        storage.set_item("orders", "[{\"id\": 1}]").unwrap();

        assert!(repo.list_all().is_empty());
        repo.append(&order("ORD-1", "2", 0)).unwrap();
        assert_eq!(repo.list_all().len(), 1);
    }

    #[test]
    fn test_append_surfaces_write_failure() {
        let storage = Arc::new(MemoryStorage::with_quota(16));
        let repo = OrderRepository::new(storage, "orders");

        assert!(repo.append(&order("ORD-1", "2", 0)).is_err());
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn test_read_failure_does_not_overwrite_history() {
        let history = serde_json::to_string(&vec![order("ORD-A", "2", 10)]).unwrap();
        let mut storage = MockStorage::new();
        let mut seq = Sequence::new();
        storage
            .expect_get_item()
            .with(eq("orders"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(StorageError::Unavailable {
                    reason: "locked".to_string(),
                })
            });
        storage
            .expect_get_item()
            .with(eq("orders"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(history.clone())));
        // Only the retry may write, and it must keep the earlier order
        storage
            .expect_set_item()
            .withf(|key, value| key == "orders" && value.contains("ORD-A") && value.contains("ORD-C"))
            .times(1)
            .returning(|_, _| Ok(()));
        let repo = OrderRepository::new(Arc::new(storage), "orders");

        let err = repo.append(&order("ORD-C", "2", 0)).unwrap_err();
        assert!(err.downcast_ref::<StorageError>().is_some());

        repo.append(&order("ORD-C", "2", 0)).unwrap();
    }
}
