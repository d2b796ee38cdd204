//! The cart state manager.

use crate::config::ManagerConfig;
use crate::subscribe::{SubscriberRegistry, Subscription};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tokio::time::timeout;
use trolley_catalog::{CatalogError, CatalogGateway, StockRecord};
use trolley_commerce::{CartError, CartSnapshot, LineItem, ProductId};
use trolley_store::CartStore;

/// Sole writer of cart state.
///
/// Holds the committed snapshot, a catalog gateway for stock checks, and a
/// store for durability. All mutations are serialized through an internal
/// lock: a mutation arriving while another is still validating stock is
/// rejected with [`CartError::Busy`] rather than queued, so two concurrent
/// increments can never both pass a stale stock check. Reads never take that
/// lock and always see the last fully committed state.
///
/// A committed mutation is *settled* once the in-memory swap happened;
/// persistence failure after that point is logged and ignored by design
/// (availability over durability for a client-side cart).
pub struct CartManager<G, S> {
    gateway: Arc<G>,
    store: Arc<S>,
    config: ManagerConfig,
    committed: RwLock<Arc<CartSnapshot>>,
    write_gate: Mutex<()>,
    subscribers: Arc<SubscriberRegistry>,
}

impl<G, S> CartManager<G, S>
where
    G: CatalogGateway,
    S: CartStore,
{
    /// Create a manager, loading the persisted cart if one exists.
    ///
    /// An unreadable persisted snapshot is discarded with a warning; the
    /// manager starts empty rather than refusing to start.
    pub fn new(gateway: Arc<G>, store: Arc<S>, config: ManagerConfig) -> Self {
        let initial = match store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => CartSnapshot::empty(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted cart, starting empty");
                CartSnapshot::empty()
            }
        };
        Self {
            gateway,
            store,
            config,
            committed: RwLock::new(Arc::new(initial)),
            write_gate: Mutex::new(()),
            subscribers: SubscriberRegistry::new(),
        }
    }

    /// The last committed snapshot. O(1), never blocks on mutations.
    pub fn snapshot(&self) -> Arc<CartSnapshot> {
        Arc::clone(&self.committed.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Register a listener invoked with every committed snapshot.
    ///
    /// Any number of subscribers may be registered at once. The listener
    /// stays registered until the returned handle is dropped or
    /// [`Subscription::unsubscribe`] is called.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Arc<CartSnapshot>) + Send + Sync + 'static,
    {
        SubscriberRegistry::add(&self.subscribers, Arc::new(listener))
    }

    /// Add one unit of a product to the cart.
    ///
    /// If the product is already in the cart this is an increment of its
    /// quantity, re-validated against current stock. Otherwise the catalog is
    /// queried and a new line with quantity 1 is inserted, snapshotting price,
    /// title and image at insertion time.
    pub async fn add_product(&self, product_id: ProductId) -> Result<Arc<CartSnapshot>, CartError> {
        let _gate = self.write_gate.try_lock().map_err(|_| CartError::Busy)?;

        let current = self.snapshot();
        if let Some(item) = current.get(product_id) {
            let requested = i64::from(item.quantity) + 1;
            return self.set_quantity_locked(&current, product_id, requested).await;
        }

        let record = self.lookup(product_id).await?;
        if record.stock <= 0 {
            return Err(CartError::OutOfStock {
                product_id,
                requested: 1,
                available: record.stock,
            });
        }

        let item = LineItem::new(product_id, record.title, record.unit_price, record.image, 1)?;
        Ok(self.commit(current.with_item(item)))
    }

    /// Remove a product from the cart.
    ///
    /// Returns `ProductNotFound` (state untouched) when the product is not
    /// in the cart.
    pub async fn remove_product(
        &self,
        product_id: ProductId,
    ) -> Result<Arc<CartSnapshot>, CartError> {
        let _gate = self.write_gate.try_lock().map_err(|_| CartError::Busy)?;

        let current = self.snapshot();
        let next = current.without(product_id)?;
        Ok(self.commit(next))
    }

    /// Set a product's quantity to `amount` exactly (absolute, not a delta).
    ///
    /// `amount <= 0` is a caller error (`InvalidAmount`): the UI should have
    /// disabled the decrement control at quantity 1, and the manager rejects
    /// rather than silently clamping. Increments are checked against current
    /// catalog stock on every call, since stock can change between renders;
    /// decrements skip the stock check and work even with the catalog down.
    pub async fn set_quantity(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Arc<CartSnapshot>, CartError> {
        let _gate = self.write_gate.try_lock().map_err(|_| CartError::Busy)?;

        let current = self.snapshot();
        self.set_quantity_locked(&current, product_id, amount).await
    }

    /// Remove every item and evict the persisted snapshot.
    pub async fn clear(&self) -> Result<Arc<CartSnapshot>, CartError> {
        let _gate = self.write_gate.try_lock().map_err(|_| CartError::Busy)?;

        let next = Arc::new(self.snapshot().cleared());
        self.swap_committed(&next);
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to evict persisted cart");
        }
        self.subscribers.notify(&next);
        Ok(next)
    }

    /// Quantity update body, called with the write gate held.
    async fn set_quantity_locked(
        &self,
        current: &CartSnapshot,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Arc<CartSnapshot>, CartError> {
        if amount <= 0 {
            return Err(CartError::InvalidAmount(amount));
        }
        let item = current
            .get(product_id)
            .ok_or(CartError::ProductNotFound(product_id))?;

        if amount > i64::from(item.quantity) {
            let record = self.lookup(product_id).await?;
            if amount > record.stock {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: amount,
                    available: record.stock,
                });
            }
        }

        let quantity = u32::try_from(amount).map_err(|_| CartError::InvalidAmount(amount))?;
        let next = current.with_quantity(product_id, quantity)?;
        Ok(self.commit(next))
    }

    /// Catalog lookup with the configured deadline.
    async fn lookup(&self, product_id: ProductId) -> Result<StockRecord, CartError> {
        match timeout(self.config.catalog_timeout, self.gateway.stock(product_id)).await {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(CatalogError::NotFound(id))) => Err(CartError::ProductNotFound(id)),
            Ok(Err(CatalogError::Unavailable(reason))) => Err(CartError::CatalogUnavailable(reason)),
            Err(_) => Err(CartError::CatalogUnavailable(format!(
                "stock lookup timed out after {:?}",
                self.config.catalog_timeout
            ))),
        }
    }

    /// Settle a mutation: swap in the snapshot, persist, notify.
    ///
    /// The swap makes the mutation visible to readers; a save failure after
    /// that is a warning, never a rollback.
    fn commit(&self, next: CartSnapshot) -> Arc<CartSnapshot> {
        let next = Arc::new(next);
        self.swap_committed(&next);
        if let Err(e) = self.store.save(&next) {
            tracing::warn!(
                error = %e,
                revision = next.revision(),
                "failed to persist cart, keeping in-memory state"
            );
        }
        tracing::debug!(
            revision = next.revision(),
            lines = next.len(),
            "cart mutation committed"
        );
        self.subscribers.notify(&next);
        next
    }

    fn swap_committed(&self, next: &Arc<CartSnapshot>) {
        *self
            .committed
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_catalog::MemoryCatalog;
    use trolley_commerce::{Currency, Money};
    use trolley_store::MemoryStore;

    fn record(stock: i64, cents: i64) -> StockRecord {
        StockRecord {
            stock,
            unit_price: Money::new(cents, Currency::USD),
            title: "Sneaker".to_string(),
            image: "https://cdn.example/sneaker.jpg".to_string(),
        }
    }

    fn manager_with(
        stock: i64,
        cents: i64,
    ) -> (Arc<MemoryCatalog>, Arc<MemoryStore>, CartManager<MemoryCatalog, MemoryStore>) {
        let catalog = Arc::new(MemoryCatalog::new());
        catalog.insert(ProductId::new(42), record(stock, cents));
        let store = Arc::new(MemoryStore::new());
        let manager = CartManager::new(
            Arc::clone(&catalog),
            Arc::clone(&store),
            ManagerConfig::default(),
        );
        (catalog, store, manager)
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (_, _, manager) = manager_with(5, 1000);
        assert_eq!(
            manager.add_product(ProductId::new(7)).await.unwrap_err(),
            CartError::ProductNotFound(ProductId::new(7))
        );
        assert!(manager.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_add_out_of_stock_product() {
        let (catalog, _, manager) = manager_with(0, 1000);
        let err = manager.add_product(ProductId::new(42)).await.unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { available: 0, .. }));

        catalog.set_stock(ProductId::new(42), 1);
        assert!(manager.add_product(ProductId::new(42)).await.is_ok());
    }

    #[tokio::test]
    async fn test_add_snapshots_price_at_insertion() {
        let (catalog, _, manager) = manager_with(5, 1000);
        manager.add_product(ProductId::new(42)).await.unwrap();

        // Later price changes must not leak into the existing line.
        catalog.insert(ProductId::new(42), record(5, 9999));
        let snapshot = manager.add_product(ProductId::new(42)).await.unwrap();
        let item = snapshot.get(ProductId::new(42)).unwrap();
        assert_eq!(item.unit_price.amount_cents, 1000);
        assert_eq!(item.quantity, 2);
    }

    #[tokio::test]
    async fn test_remove_absent_product_is_reported() {
        let (_, _, manager) = manager_with(5, 1000);
        assert_eq!(
            manager.remove_product(ProductId::new(42)).await.unwrap_err(),
            CartError::ProductNotFound(ProductId::new(42))
        );
    }

    #[tokio::test]
    async fn test_set_quantity_rejects_non_positive() {
        let (_, _, manager) = manager_with(5, 1000);
        manager.add_product(ProductId::new(42)).await.unwrap();

        for amount in [0, -3] {
            assert_eq!(
                manager.set_quantity(ProductId::new(42), amount).await.unwrap_err(),
                CartError::InvalidAmount(amount)
            );
        }
        assert_eq!(manager.snapshot().get(ProductId::new(42)).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_decrement_skips_stock_check() {
        let (catalog, _, manager) = manager_with(5, 1000);
        manager.add_product(ProductId::new(42)).await.unwrap();
        manager.set_quantity(ProductId::new(42), 3).await.unwrap();

        catalog.set_offline(true);
        let snapshot = manager.set_quantity(ProductId::new(42), 2).await.unwrap();
        assert_eq!(snapshot.get(ProductId::new(42)).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_increment_rechecks_stock_every_time() {
        let (catalog, _, manager) = manager_with(5, 1000);
        manager.add_product(ProductId::new(42)).await.unwrap();

        // Stock shrinks between renders; the next increment must see it.
        catalog.set_stock(ProductId::new(42), 1);
        let err = manager.set_quantity(ProductId::new(42), 2).await.unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: ProductId::new(42),
                requested: 2,
                available: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_clear_empties_cart_and_store() {
        let (_, store, manager) = manager_with(5, 1000);
        manager.add_product(ProductId::new(42)).await.unwrap();
        assert!(store.saved().is_some());

        let snapshot = manager.clear().await.unwrap();
        assert!(snapshot.is_empty());
        assert!(store.saved().is_none());
    }

    #[tokio::test]
    async fn test_restart_reloads_persisted_cart() {
        let (catalog, store, manager) = manager_with(5, 1000);
        manager.add_product(ProductId::new(42)).await.unwrap();
        manager.set_quantity(ProductId::new(42), 3).await.unwrap();
        drop(manager);

        let reborn = CartManager::new(catalog, store, ManagerConfig::default());
        assert_eq!(reborn.snapshot().get(ProductId::new(42)).unwrap().quantity, 3);
    }
}
