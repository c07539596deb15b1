//! # Weight Module
//!
//! Shipping weight stored as integer grams, for the same reason `Money` is
//! stored as integer cents: `0.2 + 0.2 + 8.0` must be exactly `8.4`.
//!
//! ## Usage
//! ```rust
//! use quickcart_core::weight::Weight;
//!
//! let cheese = Weight::from_kilograms(0.2);
//! assert_eq!(cheese.grams(), 200);
//!
//! let parcel = cheese + cheese + Weight::from_grams(8_000);
//! assert_eq!(parcel.to_string(), "8.4kg");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

/// Slack for f64 products that fall just short of a whole gram.
const GRAM_EPSILON: f64 = 1e-6;

/// A physical weight in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Weight(u64);

impl Weight {
    /// Creates a weight from grams.
    #[inline]
    pub const fn from_grams(grams: u64) -> Self {
        Weight(grams)
    }

    /// Creates a weight from kilograms, truncated to whole grams.
    ///
    /// Negative and non-finite inputs clamp to zero. Products that are
    /// a hair under a gram boundary after the f64 multiply (`1.001 * 1000.0`
    /// is `1000.9999999999999`) still land on that boundary.
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::weight::Weight;
    ///
    /// assert_eq!(Weight::from_kilograms(1.001).grams(), 1001);
    /// assert_eq!(Weight::from_kilograms(0.2999).grams(), 299);
    /// assert_eq!(Weight::from_kilograms(-1.0).grams(), 0);
    /// ```
    pub fn from_kilograms(kg: f64) -> Self {
        if !kg.is_finite() || kg <= 0.0 {
            return Weight(0);
        }
        Weight((kg * 1000.0 + GRAM_EPSILON).floor() as u64)
    }

    /// Returns the weight in grams.
    #[inline]
    pub const fn grams(&self) -> u64 {
        self.0
    }

    /// Returns the weight in tenths of a kilogram, rounded half up.
    #[inline]
    pub const fn tenths_of_kg(&self) -> u64 {
        self.0.saturating_add(50) / 100
    }

    /// Zero weight.
    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
    }
}

/// Kilograms with one decimal place: `8.4kg`.
impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.tenths_of_kg();
        write!(f, "{}.{}kg", tenths / 10, tenths % 10)
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Weight {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.fold(Weight::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kilograms() {
        assert_eq!(Weight::from_kilograms(0.2).grams(), 200);
        assert_eq!(Weight::from_kilograms(0.7).grams(), 700);
        assert_eq!(Weight::from_kilograms(8.0).grams(), 8000);
        assert_eq!(Weight::from_kilograms(f64::NAN).grams(), 0);
    }

    #[test]
    fn test_from_kilograms_truncates() {
        assert_eq!(Weight::from_kilograms(0.2999).grams(), 299);
        assert_eq!(Weight::from_kilograms(0.0005).grams(), 0);
        assert_eq!(Weight::from_kilograms(1.9999).grams(), 1999);
        // products just below a whole gram
        assert_eq!(Weight::from_kilograms(1.001).grams(), 1001);
        assert_eq!(Weight::from_kilograms(1.019).grams(), 1019);
        assert_eq!(Weight::from_kilograms(0.29).grams(), 290);
    }

    #[test]
    fn test_display_one_decimal() {
        assert_eq!(Weight::from_grams(8400).to_string(), "8.4kg");
        assert_eq!(Weight::from_grams(1100).to_string(), "1.1kg");
        assert_eq!(Weight::from_grams(0).to_string(), "0.0kg");
        // rounds half up
        assert_eq!(Weight::from_grams(1050).to_string(), "1.1kg");
        assert_eq!(Weight::from_grams(1049).to_string(), "1.0kg");
    }

    #[test]
    fn test_sum() {
        let total: Weight = [200, 200, 8000].into_iter().map(Weight::from_grams).sum();
        assert_eq!(total, Weight::from_grams(8400));
    }
}
