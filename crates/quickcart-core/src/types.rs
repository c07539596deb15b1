//! # Domain Types
//!
//! Core domain types used throughout QuickCart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌─────────────────┐                   │
//! │  │      Product         │        │    Customer     │                   │
//! │  │  ──────────────────  │        │  ─────────────  │                   │
//! │  │  id (UUID)           │        │  name           │                   │
//! │  │  name                │        │  balance        │                   │
//! │  │  unit_price          │        └─────────────────┘                   │
//! │  │  quantity_on_hand    │                                               │
//! │  │  kind ───────────────┼──► Regular                                    │
//! │  └──────────────────────┘    Expirable { expires_at, weight }          │
//! │                              Shippable { weight }                       │
//! │                                                                         │
//! │  ┌──────────────────────┐                                               │
//! │  │   CheckoutPolicy     │  shipping_fee, stock_check                    │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Capabilities, Not Type Checks
//! Whether a product expires or ships is answered by `ProductKind`, not by
//! asking what type a value is:
//!
//! | Kind       | `is_expired_at`         | `shipping_info`  |
//! |------------|-------------------------|------------------|
//! | Regular    | always `false`          | `None`           |
//! | Expirable  | `expires_at < now`      | `Some(..)`       |
//! | Shippable  | always `false`          | `Some(..)`       |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::shipping::ShippableUnit;
use crate::validation::{
    validate_balance, validate_customer_name, validate_price, validate_product_name,
    validate_stock,
};
use crate::weight::Weight;
use crate::SHIPPING_FEE;

// =============================================================================
// Product Identity
// =============================================================================

/// Catalog key for a product (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Product
// =============================================================================

/// How a product behaves with respect to expiry and shipping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Never expires, never ships (e.g. a scratch card).
    Regular,

    /// Perishable goods. Always shipped.
    Expirable {
        expires_at: DateTime<Utc>,
        weight: Weight,
    },

    /// Durable physical goods (e.g. a TV).
    Shippable { weight: Weight },
}

impl ProductKind {
    /// Shipping weight, if this kind ships at all.
    pub fn weight(&self) -> Option<Weight> {
        match self {
            ProductKind::Regular => None,
            ProductKind::Expirable { weight, .. } | ProductKind::Shippable { weight } => {
                Some(*weight)
            }
        }
    }
}

/// A product in the catalog.
///
/// Fields are private: stock only ever moves through
/// [`Product::reduce_quantity`], which checkout calls after every gate has
/// passed. Deserialized products go through the same checks as the
/// constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    id: ProductId,
    name: String,
    unit_price: Money,
    quantity_on_hand: i64,
    kind: ProductKind,
}

impl Product {
    /// Creates a product that neither expires nor ships.
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::{Money, Product};
    ///
    /// let card = Product::regular("Scratch Card", Money::from_major(50), 10).unwrap();
    /// assert_eq!(card.display_name(), "Scratch Card");
    /// assert!(!card.is_shippable());
    /// ```
    pub fn regular(
        name: impl Into<String>,
        unit_price: Money,
        quantity_on_hand: i64,
    ) -> CoreResult<Self> {
        Self::new(name.into(), unit_price, quantity_on_hand, ProductKind::Regular)
    }

    /// Creates a perishable product that ships.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{Duration, Utc};
    /// use quickcart_core::{Money, Product, Weight};
    ///
    /// let cheese = Product::expirable(
    ///     "Cheese",
    ///     Money::from_major(150),
    ///     5,
    ///     Utc::now() + Duration::days(30),
    ///     Weight::from_kilograms(0.2),
    /// )
    /// .unwrap();
    /// assert_eq!(cheese.display_name(), "Cheese 200g");
    /// ```
    pub fn expirable(
        name: impl Into<String>,
        unit_price: Money,
        quantity_on_hand: i64,
        expires_at: DateTime<Utc>,
        weight: Weight,
    ) -> CoreResult<Self> {
        Self::new(
            name.into(),
            unit_price,
            quantity_on_hand,
            ProductKind::Expirable { expires_at, weight },
        )
    }

    /// Creates a durable product that ships.
    pub fn shippable(
        name: impl Into<String>,
        unit_price: Money,
        quantity_on_hand: i64,
        weight: Weight,
    ) -> CoreResult<Self> {
        Self::new(
            name.into(),
            unit_price,
            quantity_on_hand,
            ProductKind::Shippable { weight },
        )
    }

    fn new(
        name: String,
        unit_price: Money,
        quantity_on_hand: i64,
        kind: ProductKind,
    ) -> CoreResult<Self> {
        let product = Product::try_from(ProductRecord {
            id: ProductId::new(),
            name,
            unit_price,
            quantity_on_hand,
            kind,
        })?;
        Ok(product)
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// The stored name, without any weight suffix.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn quantity_on_hand(&self) -> i64 {
        self.quantity_on_hand
    }

    #[inline]
    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Expiry instant for perishable products.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            ProductKind::Expirable { expires_at, .. } => Some(expires_at),
            _ => None,
        }
    }

    /// True iff the product is perishable and `expires_at` is strictly
    /// before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| expires_at < now)
    }

    /// Evaluates expiry against the clock's current instant.
    ///
    /// Not stable across calls: a product can expire between `Cart::add`
    /// and checkout.
    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        self.is_expired_at(clock.now())
    }

    /// True iff `requested` does not exceed the stock on hand.
    ///
    /// Non-positive requests are rejected by callers before this is asked.
    #[inline]
    pub fn is_available(&self, requested: i64) -> bool {
        requested <= self.quantity_on_hand
    }

    /// Removes `amount` units from stock.
    ///
    /// No availability check happens here; checkout validates every line
    /// first. Stock is floored at zero, which only matters when two cart
    /// lines for the same product each passed the per-line check.
    pub(crate) fn reduce_quantity(&mut self, amount: i64) {
        self.quantity_on_hand = (self.quantity_on_hand - amount).max(0);
    }

    #[inline]
    pub fn is_shippable(&self) -> bool {
        self.kind.weight().is_some()
    }

    /// User-facing name. Shippable kinds embed their weight in grams:
    /// `"Cheese 200g"`.
    pub fn display_name(&self) -> String {
        match self.kind.weight() {
            Some(weight) => format!("{} {}g", self.name, weight.grams()),
            None => self.name.clone(),
        }
    }

    /// One physical unit of this product for the shipment manifest, or
    /// `None` if the product does not ship.
    pub fn shipping_info(&self) -> Option<ShippableUnit> {
        self.kind
            .weight()
            .map(|weight| ShippableUnit::new(self.display_name(), weight))
    }
}

/// Unchecked wire form of [`Product`].
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    unit_price: Money,
    quantity_on_hand: i64,
    kind: ProductKind,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        validate_product_name(&record.name)?;
        validate_price(record.unit_price)?;
        validate_stock(record.quantity_on_hand)?;

        Ok(Product {
            id: record.id,
            name: record.name.trim().to_string(),
            unit_price: record.unit_price,
            quantity_on_hand: record.quantity_on_hand,
            kind: record.kind,
        })
    }
}

// =============================================================================
// Customer
// =============================================================================

/// The paying customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CustomerRecord")]
pub struct Customer {
    name: String,
    balance: Money,
}

impl Customer {
    /// Creates a customer with an opening balance.
    pub fn new(name: impl Into<String>, balance: Money) -> CoreResult<Self> {
        let customer = Customer::try_from(CustomerRecord {
            name: name.into(),
            balance,
        })?;
        Ok(customer)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn balance(&self) -> Money {
        self.balance
    }

    #[inline]
    pub fn can_afford(&self, total: Money) -> bool {
        self.balance >= total
    }

    /// Debits the balance. Negative amounts are ignored; the balance never
    /// grows.
    pub fn deduct(&mut self, amount: Money) {
        self.balance -= amount.max(Money::zero());
    }
}

#[derive(Deserialize)]
struct CustomerRecord {
    name: String,
    balance: Money,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = ValidationError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        validate_customer_name(&record.name)?;
        validate_balance(record.balance)?;

        Ok(Customer {
            name: record.name.trim().to_string(),
            balance: record.balance,
        })
    }
}

// =============================================================================
// Checkout Policy
// =============================================================================

/// How checkout decides whether stock covers the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockCheck {
    /// Each line is checked on its own against the unreduced stock.
    ///
    /// Two lines for the same product can each pass and together ask for
    /// more than is on hand.
    #[default]
    PerLine,

    /// Lines for the same product are summed before the availability check.
    Aggregate,
}

impl fmt::Display for StockCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockCheck::PerLine => write!(f, "per_line"),
            StockCheck::Aggregate => write!(f, "aggregate"),
        }
    }
}

impl FromStr for StockCheck {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per_line" | "per-line" | "perline" => Ok(StockCheck::PerLine),
            "aggregate" => Ok(StockCheck::Aggregate),
            other => Err(ValidationError::InvalidFormat {
                field: "stock_check".to_string(),
                reason: format!("unknown value '{}', expected per_line or aggregate", other),
            }),
        }
    }
}

/// Knobs for the checkout algorithm. The defaults are the standard rules:
/// flat 30.00 shipping and per-line stock checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    /// Flat fee charged once when anything in the cart ships.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: Money,

    #[serde(default)]
    pub stock_check: StockCheck,
}

fn default_shipping_fee() -> Money {
    SHIPPING_FEE
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        CheckoutPolicy {
            shipping_fee: default_shipping_fee(),
            stock_check: StockCheck::default(),
        }
    }
}

impl CheckoutPolicy {
    /// Rejects a negative shipping fee.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.shipping_fee.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "shipping_fee".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn cheese(expires_at: DateTime<Utc>) -> Product {
        Product::expirable(
            "Cheese",
            Money::from_major(150),
            5,
            expires_at,
            Weight::from_kilograms(0.2),
        )
        .unwrap()
    }

    #[test]
    fn test_display_names() {
        let tv = Product::shippable("TV", Money::from_major(8000), 2, Weight::from_kilograms(8.0))
            .unwrap();
        assert_eq!(tv.display_name(), "TV 8000g");
        assert_eq!(tv.name(), "TV");

        let card = Product::regular("Scratch Card", Money::from_major(50), 10).unwrap();
        assert_eq!(card.display_name(), "Scratch Card");
    }

    #[test]
    fn test_expiry_is_strictly_before_now() {
        let now = noon();
        assert!(!cheese(now).is_expired_at(now));
        assert!(cheese(now - Duration::seconds(1)).is_expired_at(now));
        assert!(!cheese(now + Duration::days(1)).is_expired_at(now));

        let card = Product::regular("Scratch Card", Money::from_major(50), 10).unwrap();
        assert!(!card.is_expired_at(now));
    }

    #[test]
    fn test_is_expired_reads_clock() {
        let product = cheese(noon());
        assert!(!product.is_expired(&FixedClock(noon())));
        assert!(product.is_expired(&FixedClock(noon() + Duration::minutes(1))));
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let product = cheese(noon());
        let before = product.clone();
        for _ in 0..3 {
            let _ = product.is_available(4);
            let _ = product.is_available(6);
            let _ = product.is_expired_at(noon());
        }
        assert_eq!(product, before);
    }

    #[test]
    fn test_availability() {
        let product = cheese(noon());
        assert!(product.is_available(5));
        assert!(!product.is_available(6));
    }

    #[test]
    fn test_reduce_quantity_floors_at_zero() {
        let mut product = cheese(noon());
        product.reduce_quantity(3);
        assert_eq!(product.quantity_on_hand(), 2);
        product.reduce_quantity(3);
        assert_eq!(product.quantity_on_hand(), 0);
    }

    #[test]
    fn test_shipping_info() {
        let unit = cheese(noon()).shipping_info().unwrap();
        assert_eq!(unit.display_name(), "Cheese 200g");
        assert_eq!(unit.weight(), Weight::from_grams(200));

        let card = Product::regular("Scratch Card", Money::from_major(50), 10).unwrap();
        assert!(card.shipping_info().is_none());
    }

    #[test]
    fn test_product_validation() {
        assert!(Product::regular("", Money::from_major(1), 1).is_err());
        assert!(Product::regular("Pen", Money::from_cents(-1), 1).is_err());
        assert!(Product::regular("Pen", Money::from_major(1), -1).is_err());
    }

    #[test]
    fn test_product_deserialize_is_validated() {
        let tv = Product::shippable("TV", Money::from_major(8000), 2, Weight::from_kilograms(8.0))
            .unwrap();
        let json = serde_json::to_value(&tv).unwrap();
        let back: Product = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, tv);

        let mut negative_stock = json.clone();
        negative_stock["quantity_on_hand"] = serde_json::json!(-5);
        assert!(serde_json::from_value::<Product>(negative_stock).is_err());

        let mut negative_price = json.clone();
        negative_price["unit_price"] = serde_json::json!(-100);
        assert!(serde_json::from_value::<Product>(negative_price).is_err());

        let mut blank_name = json;
        blank_name["name"] = serde_json::json!("   ");
        assert!(serde_json::from_value::<Product>(blank_name).is_err());
    }

    #[test]
    fn test_customer_deserialize_is_validated() {
        let customer: Customer =
            serde_json::from_value(serde_json::json!({ "name": " Ahmed ", "balance": 500000 }))
                .unwrap();
        assert_eq!(customer.name(), "Ahmed");
        assert_eq!(customer.balance(), Money::from_major(5000));

        let overdrawn =
            serde_json::from_value::<Customer>(serde_json::json!({ "name": "Ahmed", "balance": -1 }));
        assert!(overdrawn.is_err());
    }

    #[test]
    fn test_display_name_truncates_grams() {
        let cheese = Product::shippable(
            "Cheese",
            Money::from_major(150),
            5,
            Weight::from_kilograms(0.2999),
        )
        .unwrap();
        assert_eq!(cheese.display_name(), "Cheese 299g");
    }

    #[test]
    fn test_customer_deduct() {
        let mut customer = Customer::new("Ahmed", Money::from_major(5000)).unwrap();
        assert!(customer.can_afford(Money::from_major(5000)));
        assert!(!customer.can_afford(Money::from_major(5001)));

        customer.deduct(Money::from_major(630));
        assert_eq!(customer.balance(), Money::from_major(4370));

        customer.deduct(Money::from_major(-100));
        assert_eq!(customer.balance(), Money::from_major(4370));
    }

    #[test]
    fn test_stock_check_parsing() {
        assert_eq!("per_line".parse::<StockCheck>().unwrap(), StockCheck::PerLine);
        assert_eq!("Aggregate".parse::<StockCheck>().unwrap(), StockCheck::Aggregate);
        assert!("sometimes".parse::<StockCheck>().is_err());
    }

    #[test]
    fn test_checkout_policy_default() {
        let policy = CheckoutPolicy::default();
        assert_eq!(policy.shipping_fee, Money::from_major(30));
        assert_eq!(policy.stock_check, StockCheck::PerLine);
        assert!(policy.validate().is_ok());

        let negative = CheckoutPolicy {
            shipping_fee: Money::from_cents(-1),
            ..policy
        };
        assert!(negative.validate().is_err());
    }
}
