//! Cart error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors reported by cart operations.
///
/// Every variant is recoverable: after a failed operation the cart stays in
/// its last committed state, so the caller can present the error and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Requested quantity exceeds catalog stock.
    #[error("product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Operation references a product that is not in the cart.
    #[error("product not in cart: {0}")]
    ProductNotFound(ProductId),

    /// Non-positive quantity requested.
    #[error("invalid quantity: {0}")]
    InvalidAmount(i64),

    /// Stock check could not complete.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Another mutation is still validating; retry.
    #[error("another cart mutation is in flight")]
    Busy,

    /// Arithmetic overflow in a price calculation.
    #[error("arithmetic overflow in price calculation")]
    Overflow,
}
