//! The persistent store trait.

use crate::error::StoreError;
use trolley_commerce::CartSnapshot;

/// Durable key-value storage for the serialized cart.
///
/// The manager loads once at startup and saves on every committed mutation.
/// A save failure never rolls back in-memory state, so implementations
/// should report errors honestly and leave retry policy to the caller.
pub trait CartStore: Send + Sync {
    /// Load the persisted snapshot, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError>;

    /// Persist a snapshot, replacing whatever was stored before.
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError>;

    /// Evict the persisted snapshot.
    fn clear(&self) -> Result<(), StoreError>;
}
