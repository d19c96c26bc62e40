//! Error type for cart store operations.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`CartStore`](crate::store::CartStore) operations.
///
/// A failed persist does not roll back the in-memory cart: subscribers have
/// already seen the new snapshot by the time the write is attempted.
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage backend failed to read or write the cart blob.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
