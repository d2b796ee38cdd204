//! JSON-file-backed cart store.

use crate::error::StoreError;
use crate::store::CartStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use trolley_commerce::CartSnapshot;

/// Persists the whole snapshot as one JSON document.
///
/// Saves write to a sibling temp file and rename it into place, so a crash
/// mid-write leaves the previous snapshot intact rather than a truncated
/// file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    ///
    /// The file does not need to exist yet; `load` reports an absent file as
    /// an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.as_mut_os_string().push(".tmp");
        tmp
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(snapshot)?;
        let tmp = self.temp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
