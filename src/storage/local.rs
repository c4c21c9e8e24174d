//! Local snapshot storage
//!
//! Key-value string storage used to cache the in-progress document
//! (`current_game`) and the saved-games list (`games`), so a reload
//! recovers unsaved work without a round trip to the record store.
//!
//! `FileSnapshotStore` backs the keys with files under a base directory.
//! All of its operations complete immediately, so handles are always in
//! the Ready state.

use std::path::PathBuf;

use super::{StorageError, StorageHandle};

/// Key-value string storage boundary
///
/// Keys are flat names; values are opaque strings (JSON blobs in
/// practice). Reading a missing key yields `None`, deleting a missing
/// key succeeds.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> StorageHandle<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageHandle<()>;
    fn remove(&self, key: &str) -> StorageHandle<()>;
}

/// File-backed snapshot store
///
/// Each key maps to one file under the base directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    base_dir: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store rooted at the given directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a key to its backing file path
    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, key: &str) -> StorageHandle<Option<String>> {
        let path = self.resolve(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => StorageHandle::ready(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StorageHandle::ready(None),
            Err(e) => StorageHandle::error(StorageError::from(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageHandle<()> {
        let path = self.resolve(key);

        // Ensure the base directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return StorageHandle::error(StorageError::from(e));
            }
        }

        match std::fs::write(&path, value) {
            Ok(()) => StorageHandle::ready(()),
            Err(e) => StorageHandle::error(StorageError::from(e)),
        }
    }

    fn remove(&self, key: &str) -> StorageHandle<()> {
        let path = self.resolve(key);
        match std::fs::remove_file(&path) {
            Ok(()) => StorageHandle::ready(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Removing a missing key is OK
                StorageHandle::ready(())
            }
            Err(e) => StorageHandle::error(StorageError::from(e)),
        }
    }
}
