//! Cart line item.

use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product entry in the cart with its own quantity.
///
/// Title, image and unit price are snapshotted from the catalog when the item
/// enters the cart; they are not re-fetched on later reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Catalog product id, unique within a cart.
    pub product_id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price at the time the item was added.
    pub unit_price: Money,
    /// Product image URL.
    pub image: String,
    /// Quantity, always >= 1.
    pub quantity: u32,
}

impl LineItem {
    /// Create a new line item.
    ///
    /// Returns `InvalidAmount` if `quantity` is zero; a line item never
    /// exists with fewer than one unit.
    pub fn new(
        product_id: ProductId,
        title: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
        quantity: u32,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidAmount(0));
        }
        Ok(Self {
            product_id,
            title: title.into(),
            unit_price,
            image: image.into(),
            quantity,
        })
    }

    /// Subtotal for this line (unit price times quantity).
    pub fn subtotal(&self) -> Result<Money, CartError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CartError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn item(quantity: u32) -> Result<LineItem, CartError> {
        LineItem::new(
            ProductId::new(1),
            "Sneaker",
            Money::new(1000, Currency::USD),
            "https://cdn.example/sneaker.jpg",
            quantity,
        )
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert_eq!(item(0).unwrap_err(), CartError::InvalidAmount(0));
    }

    #[test]
    fn test_subtotal() {
        let item = item(3).unwrap();
        assert_eq!(item.subtotal().unwrap().amount_cents, 3000);
    }

    #[test]
    fn test_subtotal_overflow() {
        let mut item = item(2).unwrap();
        item.unit_price = Money::new(i64::MAX, Currency::USD);
        assert_eq!(item.subtotal().unwrap_err(), CartError::Overflow);
    }
}
