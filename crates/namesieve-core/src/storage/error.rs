//! Storage error types

use thiserror::Error;

/// Errors that can occur during cache store operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No cache entry exists for this database id
    #[error("cache not found for database: {0}")]
    NotFound(String),

    /// Database id cannot address a cache entry
    #[error("invalid database id: {0:?}")]
    InvalidId(String),

    /// Storage backend error (filesystem, etc.)
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether this error signals a cache miss rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
