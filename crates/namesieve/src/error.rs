//! Error types for the namesieve command line.

use thiserror::Error;

/// Error type for command execution.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Request or response document could not be parsed or written
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Search engine or cache error
    #[error(transparent)]
    Search(#[from] namesieve_core::Error),

    /// Cache directory could not be opened
    #[error("cache error: {0}")]
    Cache(#[from] namesieve_fs::FsError),
}

impl Error {
    /// Whether the command failed because a database has no cache entry.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Search(e) => e.is_not_found(),
            Error::Cache(namesieve_fs::FsError::NotFound(_)) => true,
            _ => false,
        }
    }
}

/// Result type alias using the command line Error.
pub type Result<T> = std::result::Result<T, Error>;
