//! Backend boundary error types.

use parts_commerce::CommerceError;
use parts_store::StoreError;

/// Error type for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("HTTP error: {status} for {resource}: {message}")]
    Http {
        status: u16,
        resource: String,
        message: String,
    },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),

    /// A row came back without the fields or values the domain requires.
    #[error("Invalid {table} row: {reason}")]
    InvalidRow { table: &'static str, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DataError {
    pub fn invalid_row(table: &'static str, reason: impl Into<String>) -> Self {
        DataError::InvalidRow {
            table,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(e: reqwest::Error) -> Self {
        let target = e
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        if e.is_timeout() {
            DataError::Timeout(target)
        } else if e.is_connect() {
            DataError::Connection(e.to_string())
        } else if e.is_decode() {
            DataError::Deserialization(e.to_string())
        } else {
            DataError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Deserialization(e.to_string())
    }
}
