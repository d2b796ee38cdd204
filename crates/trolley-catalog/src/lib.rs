//! Catalog gateway contract for Trolley.
//!
//! The cart state manager never owns stock or price data; before accepting a
//! quantity increase it asks the catalog through the [`CatalogGateway`] trait
//! defined here. Production deployments implement the trait over their real
//! catalog service; [`MemoryCatalog`] is a complete in-process implementation
//! for tests and local development.

pub mod error;
pub mod gateway;
pub mod memory;

pub use error::CatalogError;
pub use gateway::{CatalogGateway, StockRecord};
pub use memory::MemoryCatalog;
