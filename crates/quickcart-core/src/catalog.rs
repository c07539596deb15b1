//! # Catalog
//!
//! Owns every product for the lifetime of the program. Carts hold
//! [`ProductId`]s only, so checkout borrows the catalog mutably to reduce
//! stock in place.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};

/// Product storage keyed by id, remembering insertion order for listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product and returns its id. Re-inserting an id replaces the
    /// stored product but keeps its original listing position.
    pub fn insert(&mut self, product: Product) -> ProductId {
        let id = product.id();
        if self.products.insert(id, product).is_none() {
            self.order.push(id);
        }
        id
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Like [`Catalog::get`], failing with `ProductNotFound`.
    pub fn require(&self, id: ProductId) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    pub(crate) fn require_mut(&mut self, id: ProductId) -> CoreResult<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or(CoreError::ProductNotFound(id))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in the order they were first inserted.
    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.order.iter().filter_map(|id| self.products.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_insert_and_lookup() {
        let mut catalog = Catalog::new();
        let card = Product::regular("Scratch Card", Money::from_major(50), 10).unwrap();
        let id = catalog.insert(card);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains(id));
        assert_eq!(catalog.require(id).unwrap().name(), "Scratch Card");
    }

    #[test]
    fn test_missing_product() {
        let catalog = Catalog::new();
        let id = ProductId::new();
        assert!(catalog.get(id).is_none());
        assert!(matches!(
            catalog.require(id),
            Err(CoreError::ProductNotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn test_iter_keeps_insertion_order() {
        let mut catalog = Catalog::new();
        for name in ["Cheese", "Biscuits", "Scratch Card"] {
            catalog.insert(Product::regular(name, Money::from_major(1), 1).unwrap());
        }
        let names: Vec<&str> = catalog.iter().map(Product::name).collect();
        assert_eq!(names, vec!["Cheese", "Biscuits", "Scratch Card"]);
    }
}
