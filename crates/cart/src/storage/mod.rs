//! Key-value storage backends for the persisted cart.
//!
//! The cart is stored as a single JSON blob under one fixed key. Backends
//! only need to move strings in and out; they know nothing about carts.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - Process-local map, for tests and embedding
//! - [`FileStorage`] - One file per key in a directory on disk

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error for key '{key}': {source}")]
    Io {
        /// Storage key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous get/set/remove over string blobs.
///
/// Implementations must be safe to share between tasks. `remove_item` must
/// succeed for keys that don't exist.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
