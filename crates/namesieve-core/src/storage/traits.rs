//! Storage trait definitions

use crate::fuzzy::IndexSnapshot;
use crate::storage::error::StoreResult;

/// Per-database persistence of index snapshots.
///
/// Exactly one entry exists per database id. Backends:
/// - In-memory for tests (`MemoryStore`)
/// - One JSON file per database (`namesieve-fs`)
pub trait CacheStore {
    /// Check whether an entry exists for `database_id`.
    fn exists(&self, database_id: &str) -> StoreResult<bool>;

    /// Store `snapshot`, replacing any previous entry as a whole.
    fn save(&mut self, database_id: &str, snapshot: &IndexSnapshot) -> StoreResult<()>;

    /// Read the entry for `database_id`.
    ///
    /// Returns `StoreError::NotFound` if there is none.
    fn load(&self, database_id: &str) -> StoreResult<IndexSnapshot>;

    /// Delete the entry for `database_id`.
    ///
    /// Returns `true` if an entry was deleted, `false` if it didn't exist.
    fn remove(&mut self, database_id: &str) -> StoreResult<bool>;

    /// Delete every entry.
    fn remove_all(&mut self) -> StoreResult<()>;

    /// All stored database ids.
    fn ids(&self) -> StoreResult<Vec<String>>;

    /// Load the entry if present, `None` on a cache miss.
    fn load_if_exists(&self, database_id: &str) -> StoreResult<Option<IndexSnapshot>> {
        match self.load(database_id) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
