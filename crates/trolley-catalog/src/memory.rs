//! In-memory catalog for tests and local development.

use crate::error::CatalogError;
use crate::gateway::{CatalogGateway, StockRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};
use trolley_commerce::ProductId;

/// A catalog held in a map.
///
/// Stock can be changed while a manager is using the catalog, which is
/// exactly what tests for stale-stock behavior need; `set_offline` makes
/// every lookup fail so callers can exercise their unavailability paths.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<ProductId, StockRecord>>,
    offline: AtomicBool,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product record.
    pub fn insert(&self, product_id: ProductId, record: StockRecord) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product_id, record);
    }

    /// Set the stock count of an existing product.
    ///
    /// Returns `false` if the product is unknown.
    pub fn set_stock(&self, product_id: ProductId, stock: i64) -> bool {
        let mut products = self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match products.get_mut(&product_id) {
            Some(record) => {
                record.stock = stock;
                true
            }
            None => false,
        }
    }

    /// Make every lookup fail with `Unavailable` (or restore service).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogGateway for MemoryCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord, CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("catalog offline".to_string()));
        }
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&product_id)
            .cloned()
            .ok_or(CatalogError::NotFound(product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_commerce::{Currency, Money};

    fn record(stock: i64) -> StockRecord {
        StockRecord {
            stock,
            unit_price: Money::new(1000, Currency::USD),
            title: "Sneaker".to_string(),
            image: "https://cdn.example/sneaker.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup() {
        let catalog = MemoryCatalog::new();
        catalog.insert(ProductId::new(1), record(5));

        let found = catalog.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(found.stock, 5);
        assert!(found.in_stock());

        assert_eq!(
            catalog.stock(ProductId::new(2)).await.unwrap_err(),
            CatalogError::NotFound(ProductId::new(2))
        );
    }

    #[tokio::test]
    async fn test_stock_changes_between_lookups() {
        let catalog = MemoryCatalog::new();
        catalog.insert(ProductId::new(1), record(5));

        assert!(catalog.set_stock(ProductId::new(1), 2));
        assert_eq!(catalog.stock(ProductId::new(1)).await.unwrap().stock, 2);

        assert!(!catalog.set_stock(ProductId::new(9), 1));
    }

    #[tokio::test]
    async fn test_offline() {
        let catalog = MemoryCatalog::new();
        catalog.insert(ProductId::new(1), record(5));
        catalog.set_offline(true);

        assert!(matches!(
            catalog.stock(ProductId::new(1)).await,
            Err(CatalogError::Unavailable(_))
        ));

        catalog.set_offline(false);
        assert!(catalog.stock(ProductId::new(1)).await.is_ok());
    }
}
