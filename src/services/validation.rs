use regex::Regex;
use std::sync::LazyLock;

use crate::services::error_handling::{LogHelper, StorefrontError};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

static EXPIRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("expiry pattern compiles"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// Input validation for all user-provided data
pub struct InputValidator;

impl InputValidator {
    /// Trims the value and rejects it if nothing is left.
    pub fn validate_required(field: &str, value: &str) -> Result<String, StorefrontError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(fail(field, "is required"));
        }

        // Remove any control characters
        Ok(trimmed
            .chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect())
    }

    pub fn validate_email(email: &str) -> Result<String, StorefrontError> {
        let trimmed = Self::validate_required("email", email)?;
        if !EMAIL_PATTERN.is_match(&trimmed) {
            return Err(fail("email", "is not a valid email address"));
        }
        Ok(trimmed.to_lowercase())
    }

    pub fn validate_password(password: &str) -> Result<(), StorefrontError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(fail(
                "password",
                &format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        Ok(())
    }

    pub fn validate_card_number(number: &str) -> Result<String, StorefrontError> {
        let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.is_empty() {
            return Err(fail("card number", "is required"));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(fail("card number", "must contain only digits"));
        }
        if !(13..=16).contains(&digits.len()) {
            return Err(fail("card number", "must be 13 to 16 digits"));
        }
        Ok(digits)
    }

    /// Expects `MM/YY`.
    pub fn validate_expiry(expiry: &str) -> Result<String, StorefrontError> {
        let trimmed = expiry.trim();
        if !EXPIRY_PATTERN.is_match(trimmed) {
            return Err(fail("expiry date", "must be MM/YY"));
        }
        Ok(trimmed.to_string())
    }

    pub fn validate_cvv(cvv: &str) -> Result<String, StorefrontError> {
        let trimmed = cvv.trim();
        if !(3..=4).contains(&trimmed.len()) || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(fail("CVV", "must be 3 or 4 digits"));
        }
        Ok(trimmed.to_string())
    }
}

fn fail(field: &str, reason: &str) -> StorefrontError {
    LogHelper::log_validation_failure(field, reason);
    StorefrontError::validation(field, reason)
}

/// Live formatting applied to checkout inputs as the user types.
pub struct InputFormatter;

impl InputFormatter {
    /// Digits only, at most 16, grouped in fours.
    pub fn card_number(input: &str) -> String {
        let digits: Vec<char> = input.chars().filter(char::is_ascii_digit).take(16).collect();
        digits
            .chunks(4)
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `MMYY` digits rendered as `MM/YY`. The slash appears once two digits
    /// are typed.
    pub fn expiry(input: &str) -> String {
        let digits: String = input.chars().filter(char::is_ascii_digit).take(4).collect();
        if digits.len() >= 2 {
            format!("{}/{}", &digits[..2], &digits[2..])
        } else {
            digits
        }
    }

    pub fn cvv(input: &str) -> String {
        input.chars().filter(char::is_ascii_digit).take(4).collect()
    }

    /// Last four digits of a card number, for order summaries.
    pub fn last4(card_number: &str) -> String {
        let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}
