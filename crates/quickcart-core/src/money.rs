//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point balances:                                          │
//! │    5000.0 - 630.1 - 0.2 ... drifts after a few thousand checkouts       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    Prices, balances, fees and totals are all i64 cents.                │
//! │    `balance < total` is an exact integer comparison.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickcart_core::money::Money;
//!
//! let price = Money::from_major(150);        // 150.00
//! let line_total = price * 2;                // 300.00
//! let total = line_total + Money::from_cents(3000); // 330.00
//! assert_eq!(total.cents(), 33_000);
//! assert_eq!(total.to_string(), "330.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// There is no currency attached: the checkout runs in a single implicit
/// currency.
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──► CartItem line total ──► subtotal ──┐
///                                                            ├──► total
/// CheckoutPolicy.shipping_fee ───────────────────────────────┘      │
///                                                                    ▼
/// Customer.balance ─────────────────── balance < total? ──► deduct(total)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(30).cents(), 3000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Rounds to whole currency units, halves away from zero.
    ///
    /// This is what the receipt prints.
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(15_049).round_major(), 150);
    /// assert_eq!(Money::from_cents(15_050).round_major(), 151);
    /// assert_eq!(Money::from_cents(-250).round_major(), -3);
    /// ```
    #[inline]
    pub const fn round_major(&self) -> i64 {
        if self.0 < 0 {
            (self.0 - 50) / 100
        } else {
            (self.0 + 50) / 100
        }
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::money::Money;
    ///
    /// let unit_price = Money::from_major(150);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_major(300));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies by a quantity, returning `None` if the result does not fit
    /// in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::money::Money;
    ///
    /// let price = Money::from_major(150);
    /// assert_eq!(price.checked_multiply_quantity(2), Some(Money::from_major(300)));
    /// assert_eq!(Money::from_cents(i64::MAX / 2 + 1).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency symbol: `630.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
