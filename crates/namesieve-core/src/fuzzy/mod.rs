//! Fuzzy Index
//!
//! Records are bucketed by the phonetic key of their name. A search
//! normalizes the query the same way and scores it against every key with one
//! of the [`Scorer`] strategies:
//!
//! - `default`: weighted ratio (best of the others, length-aware)
//! - `simple`: edit-distance ratio
//! - `partial`: best-aligned substring window
//! - `sort`: token-sort ratio
//! - `set`: token-set ratio
//!
//! With the `parallel` feature, large indexes are scored with rayon.
//!
//! # Example
//!
//! ```rust
//! use namesieve_core::fuzzy::{FuzzyIndex, Scorer};
//! use namesieve_core::Record;
//!
//! let mut index = FuzzyIndex::new();
//! index.insert(Record::new("Стол 10x5см", 1));
//! index.insert(Record::new("Стул", 2));
//!
//! let hits = index.search("стол 50", 60, 5, Scorer::Weighted);
//! assert_eq!(hits[0].records[0].name, "Стол 10x5см");
//! ```

mod engine;
mod strategies;

pub use engine::{BucketMatch, FuzzyIndex, IndexConfig, IndexSnapshot, IndexStats};
pub use strategies::{
    partial_ratio, ratio, token_set_ratio, token_sort_ratio, weighted_ratio, Scorer,
};
