//! Catalog gateway error types.

use thiserror::Error;
use trolley_commerce::ProductId;

/// Errors returned by a catalog gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no product with this id.
    #[error("unknown product: {0}")]
    NotFound(ProductId),

    /// The catalog could not be reached or answered with an error.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
