//! # CLI Error Type
//!
//! Everything that can stop the demo: bad configuration, unreadable files,
//! and checkout failures from the core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  config.rs ── io::Error / toml::de::Error / ValidationError ──┐        │
//! │                                                                │        │
//! │  demo.rs / Cart ── CoreError ─────────────────────────────────┼──► AppError
//! │                                                                │        │
//! │  --json output ── serde_json::Error ──────────────────────────┘        │
//! │                                                                         │
//! │  main: "Error: <message>" on stderr, exit code 1                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use quickcart_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loaded but failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Checkout or catalog setup failed. The message is the core's own.
    #[error("{0}")]
    Checkout(#[from] CoreError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Machine-readable category, used by `--json` error output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ConfigError,
    EmptyCart,
    ExpiredProduct,
    InsufficientStock,
    InsufficientBalance,
    InvalidQuantity,
    AmountOverflow,
    NotFound,
    ValidationError,
    Internal,
}

/// Serialized form of a failure:
/// ```json
/// { "code": "INSUFFICIENT_BALANCE", "message": "Insufficient balance: ..." }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Config(_) | AppError::Io(_) | AppError::TomlDe(_) => ErrorCode::ConfigError,
            AppError::Checkout(err) => match err {
                CoreError::EmptyCart => ErrorCode::EmptyCart,
                CoreError::ExpiredProduct { .. } => ErrorCode::ExpiredProduct,
                CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
                CoreError::InsufficientBalance { .. } => ErrorCode::InsufficientBalance,
                CoreError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
                CoreError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
                CoreError::ProductNotFound(_) => ErrorCode::NotFound,
                CoreError::Validation(_) => ErrorCode::ValidationError,
            },
            AppError::Json(_) => ErrorCode::Internal,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcart_core::Money;

    #[test]
    fn test_checkout_errors_keep_core_message() {
        let err = AppError::from(CoreError::EmptyCart);
        assert_eq!(err.to_string(), "Cart is empty");
        assert_eq!(err.code(), ErrorCode::EmptyCart);
    }

    #[test]
    fn test_validation_becomes_config_error() {
        let err = AppError::from(ValidationError::Required {
            field: "customer name".to_string(),
        });
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }

    #[test]
    fn test_amount_overflow_code() {
        let err = AppError::from(CoreError::AmountOverflow {
            name: "Gold Bar 1000g".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::AmountOverflow);
        let json = serde_json::to_value(err.report()).unwrap();
        assert_eq!(json["code"], "AMOUNT_OVERFLOW");
        assert_eq!(json["message"], "Order amount too large for Gold Bar 1000g");
    }

    #[test]
    fn test_report_serializes_code() {
        let err = AppError::from(CoreError::InsufficientBalance {
            balance: Money::from_major(100),
            total: Money::from_major(630),
        });
        let json = serde_json::to_value(err.report()).unwrap();
        assert_eq!(json["code"], "INSUFFICIENT_BALANCE");
        assert_eq!(
            json["message"],
            "Insufficient balance: total 630.00, balance 100.00"
        );
    }
}
