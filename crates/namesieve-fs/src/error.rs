//! Error types for the file cache store

use namesieve_core::storage::StoreError;
use thiserror::Error;

/// Result type for file store operations
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors that can occur during file store operations
#[derive(Debug, Error)]
pub enum FsError {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache file could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No cache file for this database id
    #[error("cache for database {0} not found")]
    NotFound(String),

    /// Database id cannot be used as part of a file name
    #[error("invalid database id: {0:?}")]
    InvalidId(String),
}

/// Convert FsError to StoreError for the storage trait
impl From<FsError> for StoreError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound(id) => StoreError::NotFound(id),
            FsError::InvalidId(id) => StoreError::InvalidId(id),
            FsError::Json(e) => StoreError::Serialization(e.to_string()),
            FsError::Io(e) => StoreError::Backend(format!("IO: {}", e)),
        }
    }
}
