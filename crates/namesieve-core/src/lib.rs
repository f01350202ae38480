//! namesieve core engine
//!
//! Fuzzy search over short, noisy, mixed-script names (product and entity
//! names). Names are reduced to phonetic keys by a fixed normalization
//! pipeline, records are bucketed by key, and queries are scored against the
//! keys with a selectable scorer.
//!
//! # Features
//!
//! - `native` - Enable all native optimizations (parallel, simd)
//! - `parallel` - Parallel scoring via rayon for large indexes
//! - `simd` - SIMD-accelerated substring search via memchr
//!
//! # Example
//!
//! ```rust
//! use namesieve_core::service::{AddDatabaseRequest, FindRequest, SearchQuery, Searcher};
//! use namesieve_core::storage::MemoryStore;
//! use namesieve_core::Record;
//!
//! let mut searcher = Searcher::new(MemoryStore::new());
//! searcher
//!     .add_database(AddDatabaseRequest {
//!         database_id: "db1".into(),
//!         database: vec![Record::new("Стол 10x5см", 1)],
//!     })
//!     .unwrap();
//!
//! let response = searcher
//!     .find_in_database(&FindRequest {
//!         database_id: "db1".into(),
//!         search: vec![SearchQuery::new("стол 50").threshold(60)],
//!     })
//!     .unwrap();
//! assert_eq!(response.response[0].results[0].name, "Стол 10x5см");
//! ```

pub mod error;
pub mod fuzzy;
pub mod normalize;
pub mod record;
pub mod service;
pub mod storage;

// Re-export main types at crate root
pub use error::{Error, Result};
pub use fuzzy::{BucketMatch, FuzzyIndex, IndexConfig, IndexSnapshot, IndexStats, Scorer};
pub use normalize::{Normalizer, PhoneticKey};
pub use record::Record;
pub use service::{
    AddDatabaseRequest, Database, FindRequest, FindResponse, MatchedRecord, QueryResult,
    RemoveDatabaseRequest, SearchQuery, Searcher,
};
pub use storage::{CacheStore, MemoryStore, StoreError, StoreResult};
