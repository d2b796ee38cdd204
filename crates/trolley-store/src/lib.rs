//! Durable cart storage for Trolley.
//!
//! The manager writes the committed snapshot through the [`CartStore`] trait
//! after every mutation and reads it back once at startup, so a cart survives
//! process restarts. [`JsonFileStore`] persists to a JSON file on disk;
//! [`MemoryStore`] keeps the snapshot in memory for tests, including a
//! failing mode for exercising the persistence-is-non-fatal rule.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::CartStore;
