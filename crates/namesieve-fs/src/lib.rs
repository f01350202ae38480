//! File-backed cache store for namesieve indexes
//!
//! This crate persists each database's index snapshot as one JSON file in a
//! cache directory, so an index built once survives process restarts.
//!
//! # Features
//!
//! - Implements the `CacheStore` trait from namesieve-core
//! - One `cache_<id>.json` file per database
//! - Atomic replacement of cache files (temp file + rename)
//! - Clearing only touches cache files, other files in the directory stay
//!
//! # Example
//!
//! ```rust,no_run
//! use namesieve_core::service::{AddDatabaseRequest, Searcher};
//! use namesieve_core::Record;
//! use namesieve_fs::FileStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileStore::open("Caches")?;
//! let mut searcher = Searcher::new(store);
//!
//! searcher.add_database(AddDatabaseRequest {
//!     database_id: "db1".into(),
//!     database: vec![Record::new("Стол 10x5см", 1)],
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod store;

// Re-export main types
pub use error::{FsError, Result};
pub use store::FileStore;
