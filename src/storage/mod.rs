//! Storage boundaries
//!
//! The persistence collaborators the core talks to:
//! - `RecordStore`: the hosted database, collection/record CRUD with
//!   equality and ordering filters (see `records`)
//! - `SnapshotStore`: key-value string storage caching work in progress
//!   so a reload recovers unsaved work (see `local`)
//! - `GameStore`: the adapter mapping a `GameDesign` to one record blob
//!   plus the snapshot cache (see `games`)
//!
//! External backends are asynchronous; operations use a fire-and-poll
//! pattern that keeps the single-threaded editor responsive. The
//! in-process implementations complete immediately, so their handles are
//! always ready.

pub mod games;
pub mod local;
pub mod records;

use std::fmt;

pub use games::{
    export_design, validate_design, GameStore, GameStoreError, CURRENT_GAME_KEY, GAMES_COLLECTION,
    GAMES_KEY,
};
pub use local::{FileSnapshotStore, SnapshotStore};
pub use records::{MemoryRecordStore, Query, RecordStore, SortOrder};

/// Storage operation status (fire-and-poll pattern)
///
/// Operations return immediately with a handle that can be polled for
/// completion, so the UI stays responsive while an external backend
/// works in the background.
#[derive(Debug, Clone)]
pub enum StorageStatus<T> {
    /// Operation is still in progress
    Pending,
    /// Operation completed successfully
    Ready(T),
    /// Operation failed
    Error(StorageError),
}

impl<T> StorageStatus<T> {
    /// Check if the operation is still pending
    pub fn is_pending(&self) -> bool {
        matches!(self, StorageStatus::Pending)
    }

    /// Check if the operation is ready (success or error)
    pub fn is_ready(&self) -> bool {
        !self.is_pending()
    }

    /// Take the result if ready, returning None if still pending
    pub fn take(self) -> Option<Result<T, StorageError>> {
        match self {
            StorageStatus::Pending => None,
            StorageStatus::Ready(v) => Some(Ok(v)),
            StorageStatus::Error(e) => Some(Err(e)),
        }
    }
}

/// Storage error types
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Record or key not found
    NotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// I/O error
    IoError(String),
    /// Network error (hosted backend only)
    NetworkError(String),
    /// Serialization/deserialization error
    SerdeError(String),
    /// Other error
    Other(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(what) => write!(f, "not found: {}", what),
            StorageError::PermissionDenied(msg) => write!(f, "permission denied: {}", msg),
            StorageError::IoError(msg) => write!(f, "I/O error: {}", msg),
            StorageError::NetworkError(msg) => write!(f, "network error: {}", msg),
            StorageError::SerdeError(msg) => write!(f, "serialization error: {}", msg),
            StorageError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}

/// Handle for tracking an in-progress storage operation
///
/// In-process backends resolve immediately; hosted backends may stay
/// pending and should be polled.
#[derive(Debug)]
pub struct StorageHandle<T> {
    status: StorageStatus<T>,
}

impl<T> StorageHandle<T> {
    /// Create a handle that's immediately ready with a value
    pub fn ready(value: T) -> Self {
        Self {
            status: StorageStatus::Ready(value),
        }
    }

    /// Create a handle that's immediately ready with an error
    pub fn error(err: StorageError) -> Self {
        Self {
            status: StorageStatus::Error(err),
        }
    }

    /// Create a pending handle (for async operations)
    pub fn pending() -> Self {
        Self {
            status: StorageStatus::Pending,
        }
    }

    /// Check if the operation is still pending
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Check if the operation is ready
    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }

    /// Poll the operation status
    pub fn poll(&self) -> &StorageStatus<T> {
        &self.status
    }

    /// Take the result, consuming the handle
    ///
    /// Returns None if the operation is still pending.
    pub fn take(self) -> Option<Result<T, StorageError>> {
        self.status.take()
    }
}
