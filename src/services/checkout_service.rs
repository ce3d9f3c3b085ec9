use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::domain::cart::LineItem;
use crate::domain::order::{Address, Order, OrderStatus, OrderTotals};
use crate::domain::user::User;
use crate::repository::Repository;
use crate::services::cart_store::CartStore;
use crate::services::error_handling::{ErrorContext, StorefrontError};
use crate::services::payment::{CardDetails, PaymentProcessor, PaymentRequest};
use crate::services::validation::InputValidator;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckoutForm {
    pub email: String,
    pub shipping: Address,
    pub card: CardDetails,
}

impl CheckoutForm {
    /// Empty form with the contact email taken from the signed-in user.
    pub fn for_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            shipping: Address {
                country: "US".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Returns a cleaned copy of the form, or the first invalid field.
    pub fn validate(&self) -> Result<CheckoutForm, StorefrontError> {
        let shipping = &self.shipping;
        Ok(CheckoutForm {
            email: InputValidator::validate_email(&self.email)?,
            shipping: Address {
                first_name: InputValidator::validate_required("first name", &shipping.first_name)?,
                last_name: InputValidator::validate_required("last name", &shipping.last_name)?,
                street: InputValidator::validate_required("address", &shipping.street)?,
                city: InputValidator::validate_required("city", &shipping.city)?,
                state: InputValidator::validate_required("state", &shipping.state)?,
                zip_code: InputValidator::validate_required("ZIP code", &shipping.zip_code)?,
                country: InputValidator::validate_required("country", &shipping.country)?,
                phone: shipping
                    .phone
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
            },
            card: CardDetails {
                number: InputValidator::validate_card_number(&self.card.number)?,
                expiry: InputValidator::validate_expiry(&self.card.expiry)?,
                cvv: InputValidator::validate_cvv(&self.card.cvv)?,
                name_on_card: InputValidator::validate_required(
                    "name on card",
                    &self.card.name_on_card,
                )?,
            },
        })
    }
}

/// Turns a cart into a recorded order.
pub struct CheckoutService {
    repository: Arc<Repository>,
    payments: Arc<dyn PaymentProcessor>,
    tax_rate: f64,
    shipping: f64,
}

impl CheckoutService {
    pub fn new(
        repository: Arc<Repository>,
        payments: Arc<dyn PaymentProcessor>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            repository,
            payments,
            tax_rate: config.tax_rate,
            shipping: config.shipping_cost(),
        }
    }

    pub fn quote(&self, subtotal: f64) -> OrderTotals {
        OrderTotals::compute(subtotal, self.tax_rate, self.shipping)
    }

    /// Validates, charges and records an order for `items`. Leaves the cart
    /// alone; see [`CheckoutService::place_order`].
    #[instrument(skip_all, fields(user_id = %user.id, lines = items.len()))]
    pub async fn create_order(
        &self,
        user: &User,
        items: &[LineItem],
        form: &CheckoutForm,
    ) -> Result<Order> {
        if items.is_empty() {
            return Err(StorefrontError::EmptyCart.into());
        }
        let form = form.validate()?;

        let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
        let totals = self.quote(subtotal);
        let order_id = new_order_id();

        let payment = self
            .payments
            .charge(&PaymentRequest {
                order_id: order_id.clone(),
                amount: totals.total,
                card: form.card.clone(),
            })
            .await?;

        let order = Order {
            id: order_id.clone(),
            user_id: user.id.clone(),
            items: items.to_vec(),
            totals,
            status: OrderStatus::Confirmed,
            payment,
            shipping_address: form.shipping,
            created_at: Utc::now(),
        };

        ErrorContext::new("record_order")
            .with_detail("order_id", &order.id)
            .with_detail("total", order.totals.total)
            .wrap(self.repository.orders.append(&order))
            .map_err(|source| StorefrontError::OrderNotRecorded {
                order_id: order_id.clone(),
                source,
            })?;

        info!(order_id = %order.id, total = order.totals.total, "Order placed");
        Ok(order)
    }

    /// Checks out the whole cart and settles it once the order is recorded.
    pub async fn place_order(
        &self,
        cart: &mut CartStore,
        user: Option<&User>,
        form: &CheckoutForm,
    ) -> Result<Order> {
        let user = user.ok_or(StorefrontError::NotAuthenticated)?;
        let items = cart.items().to_vec();

        let order = self.create_order(user, &items, form).await?;
        cart.settle(&items);
        Ok(order)
    }
}

fn new_order_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", suffix[..8].to_uppercase())
}
