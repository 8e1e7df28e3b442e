//! # Validation Module
//!
//! Checks applied while a catalog and its rules are being built.
//!
//! Scanning performs no validation at all: an unknown identifier is only
//! reported when the checkout is totalled. Everything here runs once, at
//! catalog construction time.
//!
//! ```rust
//! use tally_core::validation::{validate_item_id, validate_price_cents};
//!
//! assert!(validate_item_id("ipd").is_ok());
//! assert!(validate_item_id("").is_err());
//! assert!(validate_price_cents(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_ID_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item identifier (catalog key).
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most `MAX_ITEM_ID_LEN` characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_item_id(item_id: &str) -> ValidationResult<()> {
    if item_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item id".to_string(),
        });
    }

    if item_id.len() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    if !item_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "item id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents: `0..=MAX_PRICE_CENTS`. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("ipd").is_ok());
        assert!(validate_item_id("apple-tv_4k").is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
        assert!(validate_item_id("has space").is_err());
        assert!(validate_item_id(&"a".repeat(MAX_ITEM_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(54999).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert_eq!(
            validate_price_cents(-100),
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_CENTS,
            })
        );
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(i64::MAX).is_err());
    }
}
