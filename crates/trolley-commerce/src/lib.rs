//! Cart domain types for Trolley.
//!
//! This crate holds the pure data model shared by the cart state manager and
//! its consumers:
//!
//! - **Identity**: `ProductId` newtype for catalog product ids
//! - **Money**: minor-unit integer money with checked arithmetic
//! - **Cart**: `LineItem` and the immutable `CartSnapshot`
//! - **Totals**: per-line subtotals and grand total derived from a snapshot
//!
//! Nothing in here talks to a catalog or a store; mutation policy lives in
//! `trolley-manager`. A snapshot handed to a consumer is a value, not a
//! window into shared state.
//!
//! # Example
//!
//! ```rust
//! use trolley_commerce::prelude::*;
//!
//! let item = LineItem::new(
//!     ProductId::new(42),
//!     "Sneaker",
//!     Money::new(1000, Currency::USD),
//!     "https://cdn.example/sneaker.jpg",
//!     2,
//! ).unwrap();
//!
//! let snapshot = CartSnapshot::empty().with_item(item);
//! let totals = snapshot.totals().unwrap();
//! assert_eq!(totals.grand_total.amount_cents, 2000);
//! ```

pub mod error;
pub mod ids;
pub mod item;
pub mod money;
pub mod snapshot;
pub mod totals;

pub use error::CartError;
pub use ids::ProductId;
pub use item::LineItem;
pub use money::{Currency, Money};
pub use snapshot::CartSnapshot;
pub use totals::{CartTotals, LineTotal};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::item::LineItem;
    pub use crate::money::{Currency, Money};
    pub use crate::snapshot::CartSnapshot;
    pub use crate::totals::{CartTotals, LineTotal};
}
