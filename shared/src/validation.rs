//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by
//! every create/update flow before anything reaches the store.

use crate::error::AppError;
use rust_decimal::Decimal;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: counter names, participant names, item names, labels.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, remarks, return reasons, narrations.
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: mobile numbers, counter/product numbers, categories.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a monetary amount is not negative.
pub fn validate_non_negative_amount(value: Decimal, field: &str) -> Result<(), AppError> {
    if value < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Counter 7", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn rejects_overlong_text() {
        let long = "x".repeat(MAX_SHORT_TEXT_LEN + 1);
        assert!(validate_required_text(&long, "mobile", MAX_SHORT_TEXT_LEN).is_err());
        assert!(validate_optional_text(Some(&long), "mobile", MAX_SHORT_TEXT_LEN).is_err());
        assert!(validate_optional_text(None, "mobile", MAX_SHORT_TEXT_LEN).is_ok());
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(validate_non_negative_amount(dec!(-1), "amount").is_err());
        assert!(validate_non_negative_amount(dec!(0), "amount").is_ok());
    }
}
