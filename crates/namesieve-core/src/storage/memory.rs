//! In-memory storage backend
//!
//! A HashMap-based implementation for tests and embedding. Nothing survives
//! the process.

use std::collections::HashMap;

use crate::fuzzy::IndexSnapshot;
use crate::storage::error::{StoreError, StoreResult};
use crate::storage::traits::CacheStore;

/// In-memory cache store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, IndexSnapshot>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Number of stored databases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn exists(&self, database_id: &str) -> StoreResult<bool> {
        Ok(self.entries.contains_key(database_id))
    }

    fn save(&mut self, database_id: &str, snapshot: &IndexSnapshot) -> StoreResult<()> {
        self.entries
            .insert(database_id.to_string(), snapshot.clone());
        Ok(())
    }

    fn load(&self, database_id: &str) -> StoreResult<IndexSnapshot> {
        self.entries
            .get(database_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(database_id.to_string()))
    }

    fn remove(&mut self, database_id: &str) -> StoreResult<bool> {
        Ok(self.entries.remove(database_id).is_some())
    }

    fn remove_all(&mut self) -> StoreResult<()> {
        self.entries.clear();
        Ok(())
    }

    fn ids(&self) -> StoreResult<Vec<String>> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
