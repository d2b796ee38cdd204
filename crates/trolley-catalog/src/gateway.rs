//! The catalog gateway trait.

use crate::error::CatalogError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use trolley_commerce::{Money, ProductId};

/// Current catalog state for one product: stock plus the metadata the cart
/// snapshots when the product is first added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockRecord {
    /// Units currently available for sale.
    pub stock: i64,
    /// Base unit price.
    pub unit_price: Money,
    /// Product title.
    pub title: String,
    /// Product image URL.
    pub image: String,
}

impl StockRecord {
    /// Check if the product can be sold at all.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Read-only stock and price authority consulted by the cart manager.
///
/// Implementations must be shareable across tasks; the manager holds one
/// behind an `Arc` and calls it while a mutation is being validated.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetch the current stock record for a product.
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord, CatalogError>;
}
