//! # Shipping
//!
//! Turns the flat list of shippable units produced by checkout into a
//! grouped manifest, and hands it to whoever dispatches parcels.
//!
//! ## Aggregation
//! ```text
//! units (one per requested unit, cart order)      manifest
//! ──────────────────────────────────────────      ─────────────────────
//! Cheese 200g  ─┐                                  2x Cheese 200g
//! Cheese 200g  ─┤  group by display name,  ──►     1x TV 8000g
//! TV 8000g     ─┘  first-seen order                Total 8.4kg
//! ```
//!
//! Grouping is by display name, not product identity: two products that
//! print the same are one manifest line. Weight is summed over every unit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::weight::Weight;

// =============================================================================
// Shippable Unit
// =============================================================================

/// One physical item that needs shipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippableUnit {
    display_name: String,
    weight: Weight,
}

impl ShippableUnit {
    pub fn new(display_name: impl Into<String>, weight: Weight) -> Self {
        ShippableUnit {
            display_name: display_name.into(),
            weight,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}

// =============================================================================
// Manifest
// =============================================================================

/// A manifest line: how many units share a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManifestEntry {
    pub count: u64,
    pub display_name: String,
}

/// Grouped shipment contents with total weight.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShipmentManifest {
    pub entries: Vec<ManifestEntry>,
    pub total_weight: Weight,
}

impl ShipmentManifest {
    /// Groups units by display name in first-seen order and sums weights.
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::shipping::{ShipmentManifest, ShippableUnit};
    /// use quickcart_core::Weight;
    ///
    /// let cheese = ShippableUnit::new("Cheese 200g", Weight::from_grams(200));
    /// let tv = ShippableUnit::new("TV 8000g", Weight::from_grams(8000));
    ///
    /// let manifest = ShipmentManifest::from_units(&[cheese.clone(), cheese, tv]);
    /// assert_eq!(manifest.entries[0].count, 2);
    /// assert_eq!(manifest.entries[1].display_name, "TV 8000g");
    /// assert_eq!(manifest.total_weight.to_string(), "8.4kg");
    /// ```
    pub fn from_units(units: &[ShippableUnit]) -> Self {
        let mut entries: Vec<ManifestEntry> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut total_weight = Weight::zero();

        for unit in units {
            match positions.get(unit.display_name()).copied() {
                Some(index) => entries[index].count += 1,
                None => {
                    positions.insert(unit.display_name(), entries.len());
                    entries.push(ManifestEntry {
                        count: 1,
                        display_name: unit.display_name().to_string(),
                    });
                }
            }
            total_weight += unit.weight();
        }

        ShipmentManifest {
            entries,
            total_weight,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of physical units across all entries.
    pub fn unit_count(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Renders the shipment notice:
/// ```text
/// ** Shipment notice **
/// 2x Cheese 200g
/// 1x TV 8000g
/// Total package weight 8.4kg
/// ```
impl fmt::Display for ShipmentManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Shipment notice **")?;
        for entry in &self.entries {
            writeln!(f, "{}x {}", entry.count, entry.display_name)?;
        }
        write!(f, "Total package weight {}", self.total_weight)
    }
}

// =============================================================================
// Shipping Service
// =============================================================================

/// Receives shipments from checkout.
///
/// Implementors decide what "dispatch" means (print a notice, queue a
/// courier request, record for a test). Aggregation is shared.
pub trait ShippingService {
    /// Hands a finished manifest over for dispatch.
    fn dispatch(&mut self, manifest: &ShipmentManifest);

    /// Aggregates `units` into a manifest, dispatches it, and returns it.
    fn send(&mut self, units: &[ShippableUnit]) -> ShipmentManifest {
        let manifest = ShipmentManifest::from_units(units);
        self.dispatch(&manifest);
        manifest
    }
}

/// Keeps every dispatched manifest in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordedShipments {
    manifests: Vec<ShipmentManifest>,
}

impl RecordedShipments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifests(&self) -> &[ShipmentManifest] {
        &self.manifests
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }
}

impl ShippingService for RecordedShipments {
    fn dispatch(&mut self, manifest: &ShipmentManifest) {
        self.manifests.push(manifest.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
