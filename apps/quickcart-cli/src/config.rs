//! # CLI Configuration
//!
//! Store name, checkout policy, and the demo customer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     QUICKCART_SHIPPING_FEE=4500                                        │
//! │     QUICKCART_STOCK_CHECK=aggregate                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/quickcart/config.toml (Linux)                            │
//! │     ~/Library/Application Support/com.quickcart.quickcart/config.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     30.00 shipping, per-line stock checks, Ahmed with 5000.00          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! Money is written in minor units (cents).
//! ```toml
//! [store]
//! name = "QuickCart"
//!
//! [checkout]
//! shipping_fee = 3000
//! stock_check = "per_line"  # per_line | aggregate
//!
//! [demo]
//! customer_name = "Ahmed"
//! customer_balance = 500000
//! expiry_days = 30
//! ```

use quickcart_core::validation::{validate_balance, validate_customer_name};
use quickcart_core::{CheckoutPolicy, Money, StockCheck, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Largest `expiry_days` magnitude accepted, about a century.
pub const MAX_EXPIRY_DAYS: i64 = 36_500;

// =============================================================================
// Store Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shown in the receipt banner.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "QuickCart".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
        }
    }
}

// =============================================================================
// Demo Configuration
// =============================================================================

/// The customer and product dates used by the demonstration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_customer_name")]
    pub customer_name: String,

    /// Opening balance in minor units.
    #[serde(default = "default_customer_balance")]
    pub customer_balance: Money,

    /// Expirable demo products expire this many days after start-up.
    /// Zero or negative makes them already expired.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,
}

fn default_customer_name() -> String {
    "Ahmed".to_string()
}

fn default_customer_balance() -> Money {
    Money::from_major(5000)
}

fn default_expiry_days() -> i64 {
    30
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            customer_name: default_customer_name(),
            customer_balance: default_customer_balance(),
            expiry_days: default_expiry_days(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub checkout: CheckoutPolicy,

    #[serde(default)]
    pub demo: DemoConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                info!(?path, "Loading config from file");
                config = Self::from_toml(&std::fs::read_to_string(&path)?)?;
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading config from file");
                    config = Self::from_toml(&std::fs::read_to_string(&path)?)?;
                }
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No config directory available, using defaults"),
            },
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if load fails.
    ///
    /// Used when no `--config` was given, so a broken default file does not
    /// stop the demo.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(AppError::Config("store name must not be empty".into()));
        }

        self.checkout.validate()?;
        validate_customer_name(&self.demo.customer_name)?;
        validate_balance(self.demo.customer_balance)?;

        if !(-MAX_EXPIRY_DAYS..=MAX_EXPIRY_DAYS).contains(&self.demo.expiry_days) {
            return Err(ValidationError::OutOfRange {
                field: "expiry_days".to_string(),
                min: -MAX_EXPIRY_DAYS,
                max: MAX_EXPIRY_DAYS,
            }
            .into());
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `QUICKCART_*` overrides read through `var`.
    ///
    /// Values that fail to parse are logged and ignored.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("QUICKCART_STORE_NAME") {
            debug!(name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(fee) = var("QUICKCART_SHIPPING_FEE") {
            match fee.trim().parse::<i64>() {
                Ok(cents) => {
                    debug!(cents, "Overriding shipping fee from environment");
                    self.checkout.shipping_fee = Money::from_cents(cents);
                }
                Err(_) => warn!(value = %fee, "Ignoring non-numeric QUICKCART_SHIPPING_FEE"),
            }
        }

        if let Some(mode) = var("QUICKCART_STOCK_CHECK") {
            match mode.parse::<StockCheck>() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding stock check from environment");
                    self.checkout.stock_check = parsed;
                }
                Err(e) => warn!("Ignoring QUICKCART_STOCK_CHECK: {}", e),
            }
        }

        if let Some(balance) = var("QUICKCART_CUSTOMER_BALANCE") {
            match balance.trim().parse::<i64>() {
                Ok(cents) => {
                    debug!(cents, "Overriding customer balance from environment");
                    self.demo.customer_balance = Money::from_cents(cents);
                }
                Err(_) => {
                    warn!(value = %balance, "Ignoring non-numeric QUICKCART_CUSTOMER_BALANCE")
                }
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "quickcart", "quickcart")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.store.name, "QuickCart");
        assert_eq!(config.checkout.shipping_fee, Money::from_major(30));
        assert_eq!(config.checkout.stock_check, StockCheck::PerLine);
        assert_eq!(config.demo.customer_name, "Ahmed");
        assert_eq!(config.demo.customer_balance, Money::from_major(5000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config = AppConfig::from_toml(
            r#"
            [store]
            name = "Corner Shop"

            [checkout]
            shipping_fee = 4500
            stock_check = "aggregate"

            [demo]
            customer_name = "Mona"
            customer_balance = 120000
            expiry_days = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Corner Shop");
        assert_eq!(config.checkout.shipping_fee, Money::from_major(45));
        assert_eq!(config.checkout.stock_check, StockCheck::Aggregate);
        assert_eq!(config.demo.customer_name, "Mona");
        assert_eq!(config.demo.customer_balance, Money::from_major(1200));
        assert_eq!(config.demo.expiry_days, 7);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml("[checkout]\nstock_check = \"aggregate\"\n").unwrap();
        assert_eq!(config.checkout.shipping_fee, Money::from_major(30));
        assert_eq!(config.checkout.stock_check, StockCheck::Aggregate);
        assert_eq!(config.demo, DemoConfig::default());

        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_malformed_file() {
        let err = AppConfig::from_toml("[checkout]\nstock_check = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, AppError::TomlDe(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.checkout.shipping_fee = Money::from_cents(-1);
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config = AppConfig::default();
        config.demo.customer_balance = Money::from_cents(-1);
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.demo.customer_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expiry_days_range() {
        let mut config = AppConfig::default();
        config.demo.expiry_days = MAX_EXPIRY_DAYS;
        assert!(config.validate().is_ok());
        config.demo.expiry_days = -MAX_EXPIRY_DAYS;
        assert!(config.validate().is_ok());

        for days in [MAX_EXPIRY_DAYS + 1, i64::MAX, i64::MIN] {
            config.demo.expiry_days = days;
            assert!(matches!(config.validate(), Err(AppError::Config(_))));
        }

        let parsed = AppConfig::from_toml("[demo]\nexpiry_days = 9223372036854775807\n").unwrap();
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("QUICKCART_STORE_NAME", "Night Market"),
            ("QUICKCART_SHIPPING_FEE", "1500"),
            ("QUICKCART_STOCK_CHECK", "aggregate"),
            ("QUICKCART_CUSTOMER_BALANCE", "25000"),
        ]));

        assert_eq!(config.store.name, "Night Market");
        assert_eq!(config.checkout.shipping_fee, Money::from_major(15));
        assert_eq!(config.checkout.stock_check, StockCheck::Aggregate);
        assert_eq!(config.demo.customer_balance, Money::from_major(250));
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("QUICKCART_SHIPPING_FEE", "thirty"),
            ("QUICKCART_STOCK_CHECK", "sometimes"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("quickcart-does-not-exist.toml");
        assert!(matches!(AppConfig::load(Some(path)), Err(AppError::Io(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let path = std::env::temp_dir().join("quickcart-does-not-exist.toml");
        assert_eq!(AppConfig::load_or_default(Some(path)), AppConfig::default());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[checkout]"));
        assert!(toml_str.contains("stock_check = \"per_line\""));
    }
}
