use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::order::{PaymentKind, PaymentSummary};
use crate::services::error_handling::StorefrontError;
use crate::services::validation::InputFormatter;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub name_on_card: String,
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub order_id: String,
    pub amount: f64,
    pub card: CardDetails,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentSummary, StorefrontError>;
}

/// Stand-in for a payment gateway. Waits for the configured delay, then
/// approves every card except the test decline number ending in `0002`.
pub struct SimulatedPaymentProcessor {
    delay: Duration,
}

impl SimulatedPaymentProcessor {
    pub const DECLINED_SUFFIX: &'static str = "0002";

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPaymentProcessor {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentSummary, StorefrontError> {
        if !self.delay.is_zero() {
            pause(self.delay).await;
        }

        let last4 = InputFormatter::last4(&request.card.number);
        if last4 == Self::DECLINED_SUFFIX {
            warn!(order_id = %request.order_id, "Simulated payment declined");
            return Err(StorefrontError::PaymentDeclined {
                reason: "card declined".to_string(),
            });
        }

        let transaction_id = format!("txn_{}", Uuid::new_v4().simple());
        info!(
            order_id = %request.order_id,
            amount = request.amount,
            transaction_id = %transaction_id,
            "Payment approved"
        );
        Ok(PaymentSummary {
            kind: PaymentKind::Card,
            last4: Some(last4),
            transaction_id,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn pause(delay: Duration) {
    tokio::time::sleep(delay).await;
}

// No tokio timer in the browser; the web build approves without waiting.
#[cfg(target_arch = "wasm32")]
async fn pause(_delay: Duration) {}
