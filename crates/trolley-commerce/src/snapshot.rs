//! Immutable cart snapshot.

use crate::error::CartError;
use crate::ids::ProductId;
use crate::item::LineItem;
use serde::{Deserialize, Serialize};

/// A fully-formed view of cart state at a point in time.
///
/// Line items keep insertion order: the first product added stays first until
/// it is removed. Consumers never mutate a snapshot they receive; the
/// `with_*` constructors below leave `self` untouched and build the *next*
/// snapshot, so two snapshots with the same revision are the same state.
///
/// Invariants held by construction:
/// - no two line items share a `product_id`
/// - every quantity is >= 1
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartSnapshot {
    items: Vec<LineItem>,
    revision: u64,
}

impl CartSnapshot {
    /// The empty cart at revision zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Monotonic revision, bumped on every committed mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Look up a line item by product id.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Next snapshot with `item` inserted, or replacing the line that already
    /// carries its product id (position preserved).
    pub fn with_item(&self, item: LineItem) -> CartSnapshot {
        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        self.next(items)
    }

    /// Next snapshot with the product's quantity set to `quantity` exactly.
    ///
    /// Returns `InvalidAmount` for a zero quantity and `ProductNotFound` when
    /// the product is not in the cart.
    pub fn with_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidAmount(0));
        }
        let mut items = self.items.clone();
        let item = items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CartError::ProductNotFound(product_id))?;
        item.quantity = quantity;
        Ok(self.next(items))
    }

    /// Next snapshot with the product removed.
    ///
    /// Returns `ProductNotFound` when the product is not in the cart.
    pub fn without(&self, product_id: ProductId) -> Result<CartSnapshot, CartError> {
        if !self.contains(product_id) {
            return Err(CartError::ProductNotFound(product_id));
        }
        let items = self
            .items
            .iter()
            .filter(|i| i.product_id != product_id)
            .cloned()
            .collect();
        Ok(self.next(items))
    }

    /// Next snapshot with all items removed.
    pub fn cleared(&self) -> CartSnapshot {
        self.next(Vec::new())
    }

    fn next(&self, items: Vec<LineItem>) -> CartSnapshot {
        CartSnapshot {
            items,
            revision: self.revision.wrapping_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn item(id: u64, quantity: u32) -> LineItem {
        LineItem::new(
            ProductId::new(id),
            format!("Product {id}"),
            Money::new(1000, Currency::USD),
            format!("https://cdn.example/{id}.jpg"),
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let snapshot = CartSnapshot::empty()
            .with_item(item(1, 1))
            .with_item(item(2, 1))
            .with_item(item(1, 5)); // replace, not reorder

        let ids: Vec<u64> = snapshot.items().iter().map(|i| i.product_id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(snapshot.get(ProductId::new(1)).unwrap().quantity, 5);
    }

    #[test]
    fn test_revision_bumps_on_every_mutation() {
        let s0 = CartSnapshot::empty();
        let s1 = s0.with_item(item(1, 1));
        let s2 = s1.without(ProductId::new(1)).unwrap();
        assert_eq!(s0.revision(), 0);
        assert_eq!(s1.revision(), 1);
        assert_eq!(s2.revision(), 2);
    }

    #[test]
    fn test_with_quantity_absent_product() {
        let snapshot = CartSnapshot::empty();
        assert_eq!(
            snapshot.with_quantity(ProductId::new(9), 1).unwrap_err(),
            CartError::ProductNotFound(ProductId::new(9))
        );
    }

    #[test]
    fn test_with_quantity_zero_rejected() {
        let snapshot = CartSnapshot::empty().with_item(item(1, 2));
        assert_eq!(
            snapshot.with_quantity(ProductId::new(1), 0).unwrap_err(),
            CartError::InvalidAmount(0)
        );
        // source snapshot untouched
        assert_eq!(snapshot.get(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_without_removes_only_target() {
        let snapshot = CartSnapshot::empty()
            .with_item(item(1, 1))
            .with_item(item(2, 3));
        let next = snapshot.without(ProductId::new(1)).unwrap();
        assert!(!next.contains(ProductId::new(1)));
        assert!(next.contains(ProductId::new(2)));
    }

    #[test]
    fn test_cleared() {
        let snapshot = CartSnapshot::empty().with_item(item(1, 1)).cleared();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.revision(), 2);
    }

    #[test]
    fn test_serde_roundtrip() {
        let snapshot = CartSnapshot::empty().with_item(item(1, 2));
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: CartSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
