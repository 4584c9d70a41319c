//! Storage error type.
//!
//! Cart operations themselves never fail: stock violations clamp, unknown
//! ids are no-ops and corrupt data resets to empty. The only fallible layer
//! is the key-value backend, whose errors the persistence adapter logs and
//! absorbs.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error while reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Key cannot be mapped onto the backend (e.g. path separators).
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Result type alias for `StorageError`.
pub type Result<T> = std::result::Result<T, StorageError>;
