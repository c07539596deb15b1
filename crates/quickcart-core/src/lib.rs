//! # quickcart-core: Checkout Logic for QuickCart
//!
//! This crate holds the whole purchase flow: products, the cart, pricing,
//! the balance gate, and shipment aggregation. It performs no I/O and
//! writes no logs; callers decide how receipts and notices are shown.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuickCart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    quickcart-cli (binary)                       │   │
//! │  │    config ──► demo catalog ──► checkout ──► print receipt      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quickcart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ shipping  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ Manifest  │  │   │
//! │  │   │ Customer  │  │  Weight   │  │  Receipt  │  │  Service  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • TIME ONLY THROUGH `Clock`               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Customer, CheckoutPolicy
//! - [`cart`] - Cart and the checkout algorithm
//! - [`catalog`] - Product storage
//! - [`shipping`] - Manifest aggregation and the `ShippingService` seam
//! - [`receipt`] - Checkout result
//! - [`money`] / [`weight`] - Integer cents and grams
//! - [`clock`] - Injectable source of "now"
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **All or Nothing**: checkout changes stock, balance, and shipments only after every check passed
//! 2. **Integer Units**: money in cents, weight in grams
//! 3. **Explicit Errors**: every failure is a typed `CoreError`
//!
//! ## Example Usage
//!
//! ```rust
//! use quickcart_core::{Cart, Catalog, Customer, Money, Product, RecordedShipments, Weight};
//!
//! let mut catalog = Catalog::new();
//! let tv = catalog.insert(
//!     Product::shippable("TV", Money::from_major(8000), 2, Weight::from_kilograms(8.0)).unwrap(),
//! );
//! let mut customer = Customer::new("Ahmed", Money::from_major(10_000)).unwrap();
//! let mut shipping = RecordedShipments::new();
//!
//! let mut cart = Cart::new();
//! cart.add(catalog.require(tv).unwrap(), 1).unwrap();
//!
//! let receipt = cart.checkout(&mut catalog, &mut customer, &mut shipping).unwrap();
//! assert_eq!(receipt.total, Money::from_major(8030));
//! assert_eq!(receipt.shipment.unwrap().total_weight.to_string(), "8.0kg");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod money;
pub mod receipt;
pub mod shipping;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CheckoutQuote};
pub use catalog::Catalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{Receipt, ReceiptLine};
pub use shipping::{ManifestEntry, RecordedShipments, ShipmentManifest, ShippableUnit, ShippingService};
pub use types::*;
pub use weight::Weight;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat fee added once per checkout when at least one unit ships.
pub const SHIPPING_FEE: Money = Money::from_major(30);

/// Maximum quantity of a single cart line.
///
/// Bounds the shipment expansion (one unit per requested item) and keeps
/// line totals far from `i64` limits for ordinary prices.
pub const MAX_ITEM_QUANTITY: i64 = 999;
