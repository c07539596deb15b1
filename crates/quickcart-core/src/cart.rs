//! # Cart & Checkout
//!
//! Accumulates line items and runs the checkout algorithm.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart::checkout                                    │
//! │                                                                         │
//! │  GATES (read only, first failure aborts)                               │
//! │  ─────────────────────────────────────                                 │
//! │  1. no lines?                         ──► EmptyCart                    │
//! │  2. per line, cart order:                                              │
//! │       product in catalog?             ──► ProductNotFound              │
//! │       expired (clock.now())?          ──► ExpiredProduct               │
//! │       qty <= stock on hand?           ──► InsufficientStock            │
//! │                                                                         │
//! │  PRICING (pure)                                                        │
//! │  ──────────────                                                        │
//! │  subtotal = Σ qty × unit_price                                         │
//! │  units    = one ShippableUnit per requested unit of shippable lines    │
//! │  shipping = units empty ? 0 : policy.shipping_fee (30.00)              │
//! │  total    = subtotal + shipping                                        │
//! │                                                                         │
//! │  3. balance < total?                  ──► InsufficientBalance          │
//! │                                                                         │
//! │  COMMIT (only after every gate passed)                                 │
//! │  ──────                                                                │
//! │  reduce stock per line → deduct total → ship units → Receipt           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-Line Stock Checks
//! Under [`StockCheck::PerLine`] every line is compared against the stock on
//! hand *before* any reduction. Two lines for the same product can each
//! pass while together overdrawing it; stock then bottoms out at zero.
//! [`StockCheck::Aggregate`] sums same-product lines first and rejects that
//! cart instead.

use std::collections::HashMap;
use std::fmt;

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::receipt::{Receipt, ReceiptLine};
use crate::shipping::{ShippableUnit, ShippingService};
use crate::types::{CheckoutPolicy, Customer, Product, ProductId, StockCheck};
use crate::validation::validate_quantity;

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart: which product, how many.
///
/// Holds the product's id, not the product. Prices and stock are read from
/// the catalog at checkout time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

// =============================================================================
// Checkout Quote
// =============================================================================

/// Validated pricing for the current cart contents.
///
/// Produced by [`Cart::quote`] without touching any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutQuote {
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
    /// Flattened physical units, cart order then repetition order.
    pub shippables: Vec<ShippableUnit>,
}

impl CheckoutQuote {
    pub fn ships(&self) -> bool {
        !self.shippables.is_empty()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines keep insertion order; receipt and manifest follow it
/// - Lines are never merged, even for the same product
/// - Every quantity is > 0
pub struct Cart {
    items: Vec<CartItem>,
    policy: CheckoutPolicy,
    clock: Box<dyn Clock>,
}

impl Cart {
    /// Creates an empty cart reading the system clock, with the default
    /// checkout policy.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            policy: CheckoutPolicy::default(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the clock used for expiry checks.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the checkout policy.
    pub fn with_policy(mut self, policy: CheckoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }

    /// Adds a line for `product`.
    ///
    /// This is an early check for the caller's benefit; checkout validates
    /// everything again because time and stock can move in between.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0` or above `MAX_ITEM_QUANTITY`
    /// - `ExpiredProduct` if the product is already expired
    /// - `InsufficientStock` if `quantity` exceeds the stock on hand
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::{Cart, CoreError, Money, Product};
    ///
    /// let card = Product::regular("Scratch Card", Money::from_major(50), 10).unwrap();
    /// let mut cart = Cart::new();
    ///
    /// cart.add(&card, 1).unwrap();
    /// assert!(matches!(cart.add(&card, 11), Err(CoreError::InsufficientStock { .. })));
    /// assert_eq!(cart.len(), 1);
    /// ```
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)
            .map_err(|_| CoreError::InvalidQuantity { requested: quantity })?;

        if product.is_expired(&*self.clock) {
            return Err(CoreError::ExpiredProduct {
                name: product.display_name(),
            });
        }

        if !product.is_available(quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.display_name(),
                available: product.quantity_on_hand(),
                requested: quantity,
            });
        }

        self.items.push(CartItem {
            product_id: product.id(),
            quantity,
        });
        Ok(())
    }

    /// Removes every line for `product_id`.
    pub fn remove(&mut self, product_id: ProductId) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotFound(product_id))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Runs every checkout gate except the balance check, and prices the
    /// cart. Nothing is mutated.
    pub fn quote(&self, catalog: &Catalog) -> CoreResult<CheckoutQuote> {
        if self.items.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let products = self.validate_lines(catalog)?;

        let mut lines = Vec::with_capacity(self.items.len());
        let mut subtotal = Money::zero();
        let mut shippables = Vec::new();

        for (item, product) in self.items.iter().zip(products) {
            let overflow = || CoreError::AmountOverflow {
                name: product.display_name(),
            };
            let line_total = product
                .unit_price()
                .checked_multiply_quantity(item.quantity)
                .ok_or_else(overflow)?;
            subtotal = subtotal.checked_add(line_total).ok_or_else(overflow)?;

            if let Some(unit) = product.shipping_info() {
                shippables.extend(std::iter::repeat(unit).take(item.quantity as usize));
            }

            lines.push(ReceiptLine {
                quantity: item.quantity,
                display_name: product.display_name(),
                unit_price: product.unit_price(),
                line_total,
            });
        }

        let shipping_fee = if shippables.is_empty() {
            Money::zero()
        } else {
            self.policy.shipping_fee
        };
        let total = subtotal
            .checked_add(shipping_fee)
            .ok_or_else(|| CoreError::AmountOverflow {
                name: "order total".to_string(),
            })?;

        Ok(CheckoutQuote {
            lines,
            subtotal,
            shipping_fee,
            total,
            shippables,
        })
    }

    /// Validates, prices, and pays for the cart.
    ///
    /// On success stock is reduced for every line, the customer is debited
    /// the total, shippable units are handed to `shipping`, and the cart is
    /// emptied. On any error nothing changes: not the catalog, not the
    /// customer, not the cart.
    ///
    /// ## Example
    /// ```rust
    /// use quickcart_core::{Cart, Catalog, Customer, Money, Product, RecordedShipments};
    ///
    /// let mut catalog = Catalog::new();
    /// let card = catalog.insert(Product::regular("Scratch Card", Money::from_major(50), 10).unwrap());
    /// let mut customer = Customer::new("Ahmed", Money::from_major(100)).unwrap();
    /// let mut shipping = RecordedShipments::new();
    ///
    /// let mut cart = Cart::new();
    /// cart.add(catalog.require(card).unwrap(), 1).unwrap();
    ///
    /// let receipt = cart.checkout(&mut catalog, &mut customer, &mut shipping).unwrap();
    /// assert_eq!(receipt.total, Money::from_major(50));
    /// assert_eq!(customer.balance(), Money::from_major(50));
    /// assert!(shipping.is_empty());
    /// ```
    pub fn checkout(
        &mut self,
        catalog: &mut Catalog,
        customer: &mut Customer,
        shipping: &mut dyn ShippingService,
    ) -> CoreResult<Receipt> {
        let quote = self.quote(catalog)?;

        if !customer.can_afford(quote.total) {
            return Err(CoreError::InsufficientBalance {
                balance: customer.balance(),
                total: quote.total,
            });
        }

        // Commit. Every id resolved during `quote`, and the catalog has been
        // exclusively borrowed since.
        for item in &self.items {
            catalog
                .require_mut(item.product_id)?
                .reduce_quantity(item.quantity);
        }
        customer.deduct(quote.total);

        let shipment = if quote.ships() {
            Some(shipping.send(&quote.shippables))
        } else {
            None
        };

        self.items.clear();

        Ok(Receipt {
            customer_name: customer.name().to_string(),
            lines: quote.lines,
            subtotal: quote.subtotal,
            shipping_fee: quote.shipping_fee,
            total: quote.total,
            balance_after: customer.balance(),
            shipment,
            completed_at: self.clock.now(),
        })
    }

    /// Resolves every line against the catalog and checks expiry and stock,
    /// in cart order.
    fn validate_lines<'c>(&self, catalog: &'c Catalog) -> CoreResult<Vec<&'c Product>> {
        let now = self.clock.now();

        let demand: HashMap<ProductId, i64> = match self.policy.stock_check {
            StockCheck::PerLine => HashMap::new(),
            StockCheck::Aggregate => {
                let mut demand = HashMap::new();
                for item in &self.items {
                    let units = demand.entry(item.product_id).or_insert(0i64);
                    *units = units.saturating_add(item.quantity);
                }
                demand
            }
        };

        let mut products = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let product = catalog.require(item.product_id)?;

            if product.is_expired_at(now) {
                return Err(CoreError::ExpiredProduct {
                    name: product.display_name(),
                });
            }

            let requested = demand
                .get(&item.product_id)
                .copied()
                .unwrap_or(item.quantity);
            if !product.is_available(requested) {
                return Err(CoreError::InsufficientStock {
                    name: product.display_name(),
                    available: product.quantity_on_hand(),
                    requested,
                });
            }

            products.push(product);
        }

        Ok(products)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
