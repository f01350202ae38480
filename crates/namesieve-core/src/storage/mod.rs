//! Per-database cache of index snapshots
//!
//! This module defines the `CacheStore` trait that abstracts over where
//! snapshots live. Implementations exist for:
//!
//! - **Memory**: in-process storage for tests (`MemoryStore`)
//! - **Filesystem**: one JSON file per database (separate crate, `namesieve-fs`)
//!
//! # Example
//!
//! ```rust
//! use namesieve_core::fuzzy::FuzzyIndex;
//! use namesieve_core::storage::{CacheStore, MemoryStore};
//! use namesieve_core::Record;
//!
//! let mut index = FuzzyIndex::new();
//! index.insert(Record::new("Стол", 1));
//!
//! let mut store = MemoryStore::new();
//! store.save("db1", &index.snapshot()).unwrap();
//! assert!(store.exists("db1").unwrap());
//! assert!(store.load("missing").unwrap_err().is_not_found());
//! ```

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::CacheStore;
