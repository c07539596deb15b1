//! # Demo Store
//!
//! The catalog, customer, and cart the CLI checks out.
//!
//! ```text
//! Product        Kind        Price   Stock  Weight  Expires
//! ─────────────  ──────────  ──────  ─────  ──────  ───────────────────
//! Cheese         expirable    150      5    0.2kg   now + expiry_days
//! Biscuits       expirable    250      3    0.7kg   now + expiry_days
//! Scratch Card   regular       50     10
//! TV             shippable   8000      2    8.0kg
//!
//! Cart: 2x Cheese, 1x Biscuits, 1x Scratch Card
//! ```

use chrono::{DateTime, Duration, Utc};
use quickcart_core::{
    Cart, Catalog, CoreResult, Customer, Money, Product, ProductId, Receipt, ShippingService,
    ValidationError, Weight,
};
use tracing::{debug, info};

use crate::config::{AppConfig, MAX_EXPIRY_DAYS};

/// Demo catalog and customer, with ids for each product.
#[derive(Debug)]
pub struct DemoStore {
    pub catalog: Catalog,
    pub customer: Customer,
    pub cheese: ProductId,
    pub biscuits: ProductId,
    pub scratch_card: ProductId,
    pub tv: ProductId,
}

impl DemoStore {
    /// Builds the demo products. Expirable products expire
    /// `config.demo.expiry_days` after `now`.
    ///
    /// An expiry outside the representable date range is a validation error.
    pub fn new(config: &AppConfig, now: DateTime<Utc>) -> CoreResult<Self> {
        let expires_at = Duration::try_days(config.demo.expiry_days)
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "expiry_days".to_string(),
                min: -MAX_EXPIRY_DAYS,
                max: MAX_EXPIRY_DAYS,
            })?;

        let mut catalog = Catalog::new();
        let cheese = catalog.insert(Product::expirable(
            "Cheese",
            Money::from_major(150),
            5,
            expires_at,
            Weight::from_kilograms(0.2),
        )?);
        let biscuits = catalog.insert(Product::expirable(
            "Biscuits",
            Money::from_major(250),
            3,
            expires_at,
            Weight::from_kilograms(0.7),
        )?);
        let scratch_card = catalog.insert(Product::regular("Scratch Card", Money::from_major(50), 10)?);
        let tv = catalog.insert(Product::shippable(
            "TV",
            Money::from_major(8000),
            2,
            Weight::from_kilograms(8.0),
        )?);

        let customer = Customer::new(
            config.demo.customer_name.as_str(),
            config.demo.customer_balance,
        )?;

        info!(
            products = catalog.len(),
            customer = customer.name(),
            balance = %customer.balance(),
            %expires_at,
            "Demo store ready"
        );

        Ok(DemoStore {
            catalog,
            customer,
            cheese,
            biscuits,
            scratch_card,
            tv,
        })
    }

    /// Fills `cart` with the demo lines and checks out.
    pub fn checkout(
        &mut self,
        mut cart: Cart,
        shipping: &mut dyn ShippingService,
    ) -> CoreResult<Receipt> {
        for (id, quantity) in [(self.cheese, 2), (self.biscuits, 1), (self.scratch_card, 1)] {
            let product = self.catalog.require(id)?;
            cart.add(product, quantity)?;
            debug!(product = %product.display_name(), quantity, "Added to cart");
        }

        let receipt = cart.checkout(&mut self.catalog, &mut self.customer, shipping)?;
        info!(
            total = %receipt.total,
            shipping_fee = %receipt.shipping_fee,
            balance_after = %receipt.balance_after,
            "Checkout complete"
        );

        Ok(receipt)
    }
}
