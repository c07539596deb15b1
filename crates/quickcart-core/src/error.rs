//! # Error Types
//!
//! Domain-specific error types for quickcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quickcart-core errors (this file)                                     │
//! │  ├── CoreError        - Cart and checkout rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quickcart-cli errors (app)                                            │
//! │  └── AppError         - Config, I/O, and wrapped CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → "Error: ..." message   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (display name, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every failure is terminal for the call that produced it

use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout errors.
///
/// Every variant aborts the whole `add` or `checkout` call. Validation always
/// runs to completion before anything is mutated, so receiving one of these
/// means no stock and no balance has changed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted on a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A product is past its expiry date.
    ///
    /// ## When This Occurs
    /// - At `Cart::add` time, if the product has already expired
    /// - At checkout time, if the expiry moment passed since `add`
    #[error("{name} is expired")]
    ExpiredProduct { name: String },

    /// Requested quantity exceeds the stock on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Cheese 200g", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// CLI shows: "Error: Not enough stock for Cheese 200g: available 3, requested 5"
    /// ```
    #[error("Not enough stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Customer cannot pay the computed total (subtotal + shipping).
    #[error("Insufficient balance: total {total}, balance {balance}")]
    InsufficientBalance { balance: Money, total: Money },

    /// Requested quantity is zero, negative, or above `MAX_ITEM_QUANTITY`.
    #[error("Invalid quantity {requested}: must be between 1 and {max}", max = crate::MAX_ITEM_QUANTITY)]
    InvalidQuantity { requested: i64 },

    /// A line total, the subtotal, or the total does not fit in `Money`.
    ///
    /// Raised by pricing, before the balance gate, so nothing is charged.
    #[error("Order amount too large for {name}")]
    AmountOverflow { name: String },

    /// A cart line references a product the catalog does not hold.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when constructing products and customers, and when validating
/// configuration, before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unknown policy name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Cheese 200g".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for Cheese 200g: available 3, requested 5"
        );

        let err = CoreError::ExpiredProduct {
            name: "Milk 1000g".to_string(),
        };
        assert_eq!(err.to_string(), "Milk 1000g is expired");

        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");

        let err = CoreError::InvalidQuantity { requested: 1000 };
        assert_eq!(
            err.to_string(),
            "Invalid quantity 1000: must be between 1 and 999"
        );
    }

    #[test]
    fn test_insufficient_balance_message() {
        let err = CoreError::InsufficientBalance {
            balance: Money::from_major(100),
            total: Money::from_major(630),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: total 630.00, balance 100.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
