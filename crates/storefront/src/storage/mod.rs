//! Durable key-value storage for store snapshots.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the seam: one string value per fixed key
//! - [`MemoryStorage`] keeps values in process (tests, throwaway sessions)
//! - [`FileStorage`] writes one JSON file per key with atomic renames
//! - [`SnapshotPersister`] sits between the stores and the storage and
//!   decides whether writes happen inline or on a background writer
//!
//! Stores never see storage errors. A failed write is logged and the next
//! mutation writes a complete snapshot again.

mod file;
mod memory;
mod persister;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persister::SnapshotPersister;

use thiserror::Error;

/// Errors that can occur when reading or writing snapshots.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be mapped to a storage location.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Background writer is no longer running.
    #[error("Snapshot writer stopped")]
    WriterStopped,
}

/// A string key-value store holding one snapshot per key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
