use thiserror::Error;

use crate::StorageKey;

/// Errors that can occur when reading or writing documents.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: StorageKey,
        #[source]
        source: std::io::Error,
    },

    /// The storage root could not be prepared.
    #[error("Storage root unavailable: {0}")]
    Root(#[source] std::io::Error),

    /// A document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
