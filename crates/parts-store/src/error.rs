//! Store error types.

use parts_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur when reading or writing local state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem read/write failed.
    #[error("Store I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be used as a file name.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// In-memory store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,

    /// Domain rule rejected the operation.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}
