//! # Receipt
//!
//! The value a successful checkout returns. Rendering it is left to the
//! caller; `Display` produces the standard text layout.
//!
//! ## Layout
//! ```text
//! ** Checkout receipt **
//! 2x Cheese 200g @ 150 = 300          ◄── one line per cart line, cart order
//! 1x Biscuits 700g @ 250 = 250
//! 1x Scratch Card @ 50 = 50
//! ----------------------
//! Subtotal 600
//! Shipping 30
//! Amount 630
//! Balance after payment: 4370
//! ```
//! Amounts print rounded to whole currency units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::shipping::ShipmentManifest;

/// One purchased cart line, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptLine {
    pub quantity: i64,
    pub display_name: String,
    pub unit_price: Money,
    /// `unit_price × quantity`
    pub line_total: Money,
}

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Receipt {
    pub customer_name: String,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
    /// Customer balance after `total` was deducted.
    pub balance_after: Money,
    /// Present when at least one line shipped.
    pub shipment: Option<ShipmentManifest>,
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

impl Receipt {
    pub fn ships(&self) -> bool {
        self.shipment.is_some()
    }
}

impl fmt::Display for ReceiptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x {} @ {} = {}",
            self.quantity,
            self.display_name,
            self.unit_price.round_major(),
            self.line_total.round_major()
        )
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Checkout receipt **")?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "----------------------")?;
        writeln!(f, "Subtotal {}", self.subtotal.round_major())?;
        writeln!(f, "Shipping {}", self.shipping_fee.round_major())?;
        writeln!(f, "Amount {}", self.total.round_major())?;
        write!(f, "Balance after payment: {}", self.balance_after.round_major())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn line(quantity: i64, name: &str, unit_major: i64) -> ReceiptLine {
        let unit_price = Money::from_major(unit_major);
        ReceiptLine {
            quantity,
            display_name: name.to_string(),
            unit_price,
            line_total: unit_price * quantity,
        }
    }

    #[test]
    fn test_line_text() {
        assert_eq!(line(2, "Cheese 200g", 150).to_string(), "2x Cheese 200g @ 150 = 300");
    }

    #[test]
    fn test_receipt_text() {
        let receipt = Receipt {
            customer_name: "Ahmed".to_string(),
            lines: vec![line(1, "Scratch Card", 50)],
            subtotal: Money::from_major(50),
            shipping_fee: Money::zero(),
            total: Money::from_major(50),
            balance_after: Money::from_cents(4_950_40),
            shipment: None,
            completed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        };

        assert!(!receipt.ships());
        assert_eq!(
            receipt.to_string(),
            "** Checkout receipt **\n\
             1x Scratch Card @ 50 = 50\n\
             ----------------------\n\
             Subtotal 50\n\
             Shipping 0\n\
             Amount 50\n\
             Balance after payment: 4950"
        );
    }

    #[test]
    fn test_receipt_serializes() {
        let receipt = Receipt {
            customer_name: "Ahmed".to_string(),
            lines: vec![line(2, "Cheese 200g", 150)],
            subtotal: Money::from_major(300),
            shipping_fee: Money::from_major(30),
            total: Money::from_major(330),
            balance_after: Money::from_major(4670),
            shipment: Some(ShipmentManifest::default()),
            completed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["total"], 33_000);
        assert_eq!(json["lines"][0]["display_name"], "Cheese 200g");
    }
}
