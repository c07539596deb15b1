//! # Validation Module
//!
//! Input validation for catalog setup and cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Construction (THIS MODULE)                                   │
//! │  ├── Product name, price, stock                                        │
//! │  └── Customer name, opening balance                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart::add (optimistic)                                       │
//! │  ├── Quantity in 1..=999 (THIS MODULE)                                 │
//! │  └── Not expired, enough stock right now                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart::checkout (authoritative)                               │
//! │  └── Expiry and stock re-checked, then balance, then commit            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickcart_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Cheese").unwrap();
//! validate_quantity(2).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product or customer name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use quickcart_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Scratch Card").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a customer name. Same rules as product names.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_name("customer name", name)
}

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// cart.add(&cheese, 2)
///       │
///       ▼
/// validate_quantity(2) ← THIS FUNCTION
///       │
///       ├── qty <= 0 or qty > 999? → CoreError::InvalidQuantity
///       │
///       └── OK → expiry check → stock check → push line
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity on hand".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an opening customer balance.
pub fn validate_balance(balance: Money) -> ValidationResult<()> {
    if balance.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "balance".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Cheese").is_ok());
        assert!(validate_product_name("Scratch Card").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_customer_name_field() {
        let err = validate_customer_name("").unwrap_err();
        assert_eq!(err.to_string(), "customer name is required");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(matches!(
            validate_quantity(1000),
            Err(ValidationError::OutOfRange { min: 1, max: 999, .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_major(150)).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_stock_and_balance() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
        assert!(validate_balance(Money::zero()).is_ok());
        assert!(validate_balance(Money::from_cents(-1)).is_err());
    }
}
