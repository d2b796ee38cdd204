//! Pricing derivation.
//!
//! Subtotals and the grand total are never stored in the canonical cart
//! state; they are recomputed from a snapshot on demand so quantities and
//! prices have a single source of truth.

use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::snapshot::CartSnapshot;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    /// Product id of the line.
    pub product_id: ProductId,
    /// Unit price snapshotted at add time.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// Subtotal (unit_price * quantity).
    pub subtotal: Money,
}

/// Complete pricing breakdown derived from a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Per-line subtotals, in cart order.
    pub lines: Vec<LineTotal>,
    /// Sum of all line subtotals.
    pub grand_total: Money,
}

impl CartSnapshot {
    /// Derive per-line subtotals and the grand total.
    ///
    /// The currency is taken from the first line item; an empty cart totals
    /// to zero in the default currency.
    pub fn totals(&self) -> Result<CartTotals, CartError> {
        let currency = self
            .items()
            .first()
            .map(|i| i.unit_price.currency)
            .unwrap_or_else(Currency::default);

        let lines = self
            .items()
            .iter()
            .map(|item| {
                Ok(LineTotal {
                    product_id: item.product_id,
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    subtotal: item.subtotal()?,
                })
            })
            .collect::<Result<Vec<_>, CartError>>()?;

        let grand_total = Money::try_sum(lines.iter().map(|l| &l.subtotal), currency)
            .ok_or(CartError::Overflow)?;

        Ok(CartTotals { lines, grand_total })
    }
}
