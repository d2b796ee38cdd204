//! Cart state manager for Trolley.
//!
//! [`CartManager`] is the sole writer of cart state. It owns the canonical
//! line-item list, validates every quantity increase against a
//! [`CatalogGateway`](trolley_catalog::CatalogGateway), persists each
//! committed snapshot through a [`CartStore`](trolley_store::CartStore), and
//! notifies subscribers with the new immutable snapshot. View code consumes
//! snapshots and calls back into the manager; it never touches cart state
//! directly.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trolley_catalog::MemoryCatalog;
//! use trolley_commerce::ProductId;
//! use trolley_manager::{CartManager, ManagerConfig};
//! use trolley_store::JsonFileStore;
//!
//! # async fn run() -> Result<(), trolley_commerce::CartError> {
//! let catalog = Arc::new(MemoryCatalog::new());
//! let store = Arc::new(JsonFileStore::new("cart.json"));
//! let manager = CartManager::new(catalog, store, ManagerConfig::default());
//!
//! let _sub = manager.subscribe(|snapshot| {
//!     println!("cart now has {} line(s)", snapshot.len());
//! });
//!
//! manager.add_product(ProductId::new(42)).await?;
//! let totals = manager.snapshot().totals()?;
//! println!("total: {}", totals.grand_total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod subscribe;

pub use config::ManagerConfig;
pub use manager::CartManager;
pub use subscribe::Subscription;
