//! Error types for search operations

use thiserror::Error;

use crate::storage::StoreError;

/// Errors surfaced by the boundary operations.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Configuration error (e.g. an unknown scorer name)
    #[error("configuration error: {0}")]
    Config(String),

    /// Cache store error, including cache misses
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Whether this error is a cache miss for the requested database.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_not_found())
    }
}

/// Result type alias using the core Error.
pub type Result<T> = std::result::Result<T, Error>;
