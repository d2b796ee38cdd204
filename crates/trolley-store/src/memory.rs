//! In-memory cart store for tests.

use crate::error::StoreError;
use crate::store::CartStore;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use trolley_commerce::CartSnapshot;

/// A store holding at most one snapshot in memory.
///
/// `fail_saves` turns every `save` into an error without touching the stored
/// value, which is how tests verify that a persistence failure neither fails
/// nor rolls back a mutation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<CartSnapshot>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose saves always fail.
    pub fn failing() -> Self {
        let store = Self::new();
        store.fail_saves.store(true, Ordering::SeqCst);
        store
    }

    /// Toggle save failures at runtime.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Inspect the stored snapshot.
    pub fn saved(&self) -> Option<CartSnapshot> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
        Ok(self.saved())
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io(io::Error::other("simulated save failure")));
        }
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
