//! # Console Shipping
//!
//! A `ShippingService` that "dispatches" by printing the shipment notice.

use quickcart_core::{ShipmentManifest, ShippingService};
use std::io::Write;
use tracing::{info, warn};

/// Prints each manifest to `out`.
#[derive(Debug)]
pub struct ConsoleShipping<W: Write> {
    out: W,
    dispatched: usize,
}

impl<W: Write> ConsoleShipping<W> {
    pub fn new(out: W) -> Self {
        ConsoleShipping { out, dispatched: 0 }
    }

    /// Number of manifests dispatched so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ShippingService for ConsoleShipping<W> {
    fn dispatch(&mut self, manifest: &ShipmentManifest) {
        info!(
            units = manifest.unit_count(),
            weight = %manifest.total_weight,
            "Dispatching shipment"
        );

        // The sale is already committed; a broken stdout must not undo it.
        if let Err(e) = writeln!(self.out, "{}", manifest) {
            warn!("Failed to print shipment notice: {}", e);
        }
        self.dispatched += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcart_core::{ShippableUnit, Weight};

    #[test]
    fn test_prints_notice() {
        let mut shipping = ConsoleShipping::new(Vec::new());
        let cheese = ShippableUnit::new("Cheese 200g", Weight::from_grams(200));
        let tv = ShippableUnit::new("TV 8000g", Weight::from_grams(8000));

        let manifest = shipping.send(&[cheese.clone(), cheese, tv]);
        assert_eq!(manifest.unit_count(), 3);
        assert_eq!(shipping.dispatched(), 1);

        let printed = String::from_utf8(shipping.into_inner()).unwrap();
        assert_eq!(
            printed,
            "** Shipment notice **\n2x Cheese 200g\n1x TV 8000g\nTotal package weight 8.4kg\n"
        );
    }
}
