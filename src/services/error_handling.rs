use anyhow::{Context, Result};
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::storage::StorageError;

/// Errors the storefront surfaces to its callers.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists: {email}")]
    UserAlreadyExists { email: String },

    #[error("Validation failed for {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Payment declined: {reason}")]
    PaymentDeclined { reason: String },

    #[error("Order {order_id} could not be recorded")]
    OrderNotRecorded {
        order_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Product not found: {id}")]
    ProductNotFound { id: String },
}

impl StorefrontError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StorefrontError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error context wrapper for better debugging
pub struct ErrorContext {
    operation: String,
    details: Vec<(String, String)>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.details.push((key.into(), value.to_string()));
        self
    }

    pub fn wrap<T>(self, result: Result<T>) -> Result<T> {
        result.with_context(|| {
            let mut msg = format!("Operation '{}' failed", self.operation);
            if !self.details.is_empty() {
                msg.push_str(" with context:");
                for (key, value) in self.details {
                    msg.push_str(&format!("\n  {}: {}", key, value));
                }
            }
            msg
        })
    }
}

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    pub fn log_cart_operation(operation: &str, product_id: Option<&str>, item_count: u64) {
        info!(
            operation = %operation,
            product_id = product_id.unwrap_or("-"),
            item_count = item_count,
            "Cart updated"
        );
    }

    pub fn log_error_with_context(context: &str, error: &anyhow::Error) {
        error!(
            context = %context,
            error = %error,
            error_chain = ?error.chain().map(|e| e.to_string()).collect::<Vec<_>>(),
            "Error occurred"
        );
    }

    pub fn log_validation_failure(field: &str, reason: &str) {
        warn!(
            field = %field,
            reason = %reason,
            "Validation failed"
        );
    }
}

/// User-friendly error messages
pub struct UserErrorFormatter;

impl UserErrorFormatter {
    pub fn format_for_ui(error: &anyhow::Error) -> String {
        if let Some(storefront_error) = error.downcast_ref::<StorefrontError>() {
            return Self::format_storefront_error(storefront_error);
        }

        if let Some(storage_error) = error.downcast_ref::<StorageError>() {
            return match storage_error {
                StorageError::QuotaExceeded { .. } => {
                    "Your browser storage is full. Changes may not be saved.".to_string()
                }
                _ => "Local storage is unavailable. Changes may not be saved.".to_string(),
            };
        }

        "An unexpected error occurred. Please try again.".to_string()
    }

    fn format_storefront_error(error: &StorefrontError) -> String {
        match error {
            StorefrontError::EmptyCart => "Your cart is empty.".to_string(),
            StorefrontError::NotAuthenticated => "Please sign in to continue.".to_string(),
            StorefrontError::InvalidCredentials => "Invalid email or password.".to_string(),
            StorefrontError::UserAlreadyExists { .. } => {
                "An account with this email already exists.".to_string()
            }
            StorefrontError::ValidationError { field, reason } => {
                format!("Invalid {}: {}", field, reason)
            }
            StorefrontError::PaymentDeclined { .. } => {
                "Your payment was declined. Please check your card details.".to_string()
            }
            StorefrontError::OrderNotRecorded { .. } => {
                "There was an error processing your order. Please try again.".to_string()
            }
            StorefrontError::ProductNotFound { .. } => {
                "The requested product could not be found.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting() {
        let error = anyhow::Error::new(StorefrontError::validation("email", "must contain @"));
        assert_eq!(
            UserErrorFormatter::format_for_ui(&error),
            "Invalid email: must contain @"
        );
    }

    #[test]
    fn test_formatting_sees_through_context() {
        let error = anyhow::Error::new(StorefrontError::EmptyCart).context("checkout");
        assert_eq!(UserErrorFormatter::format_for_ui(&error), "Your cart is empty.");
    }

    #[test]
    fn test_storage_quota_message() {
        let error = anyhow::Error::new(StorageError::QuotaExceeded {
            key: "cart".to_string(),
            requested: 10,
            limit: 5,
        });
        assert!(UserErrorFormatter::format_for_ui(&error).contains("storage is full"));
    }

    #[test]
    fn test_unknown_error_is_generic() {
        let error = anyhow::anyhow!("boom");
        assert!(UserErrorFormatter::format_for_ui(&error).contains("unexpected"));
    }

    #[test]
    fn test_error_context() {
        let result: Result<()> = Err(anyhow::anyhow!("disk unavailable"));

        let wrapped = ErrorContext::new("record_order")
            .with_detail("order_id", "ORD-1")
            .with_detail("items", 3)
            .wrap(result);

        let error_msg = wrapped.unwrap_err().to_string();
        assert!(error_msg.contains("record_order"));
        assert!(error_msg.contains("order_id: ORD-1"));
    }
}
