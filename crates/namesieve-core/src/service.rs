//! Boundary operations over per-database indexes
//!
//! Every request loads the database's index from the cache store, works on
//! that in-memory copy and, for writes, saves it back. There is no locking:
//! two concurrent add requests for the same id race and the last save wins.
//! Callers serialize requests per database id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::Result;
use crate::fuzzy::{BucketMatch, FuzzyIndex, IndexConfig, IndexSnapshot, IndexStats, Scorer};
use crate::normalize::Normalizer;
use crate::record::Record;
use crate::storage::CacheStore;

/// Default minimum similarity when a query omits it
pub const DEFAULT_THRESHOLD: f64 = 100.0;
/// Default number of keys kept per query when a query omits it
pub const DEFAULT_COUNT: usize = 5;

/// `AddDatabase` request document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDatabaseRequest {
    pub database_id: String,
    #[serde(default)]
    pub database: Vec<Record>,
}

/// `RemoveDatabase` request document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveDatabaseRequest {
    pub database_id: String,
}

/// One query of a `FindInDatabase` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub name: String,
    /// Minimum score. Any number is accepted: above 100 nothing matches,
    /// 0 or below everything does.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_scorer")]
    pub scorer: String,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_scorer() -> String {
    Scorer::default().name().to_string()
}

impl SearchQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: DEFAULT_THRESHOLD,
            count: DEFAULT_COUNT,
            scorer: default_scorer(),
        }
    }

    pub fn threshold(mut self, threshold: impl Into<f64>) -> Self {
        self.threshold = threshold.into();
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn scorer(mut self, scorer: impl Into<String>) -> Self {
        self.scorer = scorer.into();
        self
    }
}

/// `FindInDatabase` request document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindRequest {
    pub database_id: String,
    #[serde(default)]
    pub search: Vec<SearchQuery>,
}

/// A record matched by a query, with its bucket's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRecord {
    pub name: String,
    pub id: Value,
    pub similarity: u8,
}

/// Matches for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub search_name: String,
    pub results: Vec<MatchedRecord>,
}

/// `FindInDatabase` response document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindResponse {
    pub database_id: String,
    pub response: Vec<QueryResult>,
}

/// A named collection of records and the index that owns them.
#[derive(Debug)]
pub struct Database {
    id: String,
    index: FuzzyIndex,
}

impl Database {
    pub fn new(id: impl Into<String>, index: FuzzyIndex) -> Self {
        Self {
            id: id.into(),
            index,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> &FuzzyIndex {
        &self.index
    }

    pub fn insert_all(&mut self, records: impl IntoIterator<Item = Record>) {
        self.index.extend(records);
    }

    /// Run one query and flatten matched buckets into scored records.
    pub fn find(&self, query: &SearchQuery, scorer: Scorer) -> QueryResult {
        let hits = match min_score(query.threshold) {
            Some(threshold) => self
                .index
                .search(&query.name, threshold, query.count, scorer),
            None => Vec::new(),
        };
        debug!(
            database_id = %self.id,
            query = %query.name,
            scorer = %scorer,
            buckets = hits.len(),
            "search finished"
        );
        QueryResult {
            search_name: query.name.clone(),
            results: flatten(&hits),
        }
    }
}

/// Smallest integer score satisfying `score >= threshold`, `None` if no
/// score in `0..=100` can.
fn min_score(threshold: f64) -> Option<u8> {
    if threshold.is_nan() || threshold > 100.0 {
        return None;
    }
    Some(threshold.ceil().max(0.0) as u8)
}

fn flatten(hits: &[BucketMatch<'_>]) -> Vec<MatchedRecord> {
    hits.iter()
        .flat_map(|hit| {
            hit.records.iter().map(move |record| MatchedRecord {
                name: record.name.clone(),
                id: record.id.clone(),
                similarity: hit.score,
            })
        })
        .collect()
}

/// Entry point for the boundary operations, backed by a cache store.
pub struct Searcher<S> {
    store: S,
    normalizer: Arc<Normalizer>,
    config: IndexConfig,
}

impl<S: CacheStore> Searcher<S> {
    /// Create a searcher with the default normalizer
    pub fn new(store: S) -> Self {
        Self::with_config(store, Arc::new(Normalizer::default()), IndexConfig::default())
    }

    pub fn with_config(store: S, normalizer: Arc<Normalizer>, config: IndexConfig) -> Self {
        Self {
            store,
            normalizer,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Load a database from the cache.
    ///
    /// Fails with `StoreError::NotFound` if it was never built.
    pub fn open(&self, database_id: &str) -> Result<Database> {
        let snapshot = self.store.load(database_id)?;
        Ok(self.database_from(database_id, Some(snapshot)))
    }

    fn database_from(&self, database_id: &str, snapshot: Option<IndexSnapshot>) -> Database {
        let index = match snapshot {
            Some(snapshot) => {
                FuzzyIndex::from_snapshot(snapshot, self.normalizer.clone(), self.config.clone())
            }
            None => FuzzyIndex::with_normalizer(self.normalizer.clone(), self.config.clone()),
        };
        Database::new(database_id, index)
    }

    /// Append records to a database, creating it on first use, and persist.
    pub fn add_database(&mut self, request: AddDatabaseRequest) -> Result<IndexStats> {
        let existing = self.store.load_if_exists(&request.database_id)?;
        let merged = existing.is_some();
        let mut database = self.database_from(&request.database_id, existing);

        let added = request.database.len();
        database.insert_all(request.database);
        self.store
            .save(&request.database_id, &database.index().snapshot())?;

        let stats = database.index().stats();
        info!(
            database_id = %request.database_id,
            added,
            merged,
            keys = stats.keys,
            records = stats.records,
            hash = %stats.hash,
            "database saved"
        );
        Ok(stats)
    }

    /// Delete a database's cache entry. Returns whether one existed.
    pub fn remove_database(&mut self, request: &RemoveDatabaseRequest) -> Result<bool> {
        let removed = self.store.remove(&request.database_id)?;
        info!(database_id = %request.database_id, removed, "database removed");
        Ok(removed)
    }

    /// Delete every cached database.
    pub fn remove_all_databases(&mut self) -> Result<()> {
        self.store.remove_all()?;
        info!("all databases removed");
        Ok(())
    }

    /// Stored database ids.
    pub fn database_ids(&self) -> Result<Vec<String>> {
        Ok(self.store.ids()?)
    }

    /// Run every query of `request` against its database.
    ///
    /// Scorer names are validated before the database is loaded; an unknown
    /// name fails the whole request with a configuration error.
    pub fn find_in_database(&self, request: &FindRequest) -> Result<FindResponse> {
        let scorers = request
            .search
            .iter()
            .map(|q| q.scorer.parse::<Scorer>())
            .collect::<Result<Vec<_>>>()?;

        let database = self.open(&request.database_id)?;

        let response = request
            .search
            .iter()
            .zip(scorers)
            .map(|(query, scorer)| database.find(query, scorer))
            .collect();

        Ok(FindResponse {
            database_id: request.database_id.clone(),
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::{MemoryStore, StoreError};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn add(searcher: &mut Searcher<MemoryStore>, id: &str, records: Vec<Record>) -> IndexStats {
        searcher
            .add_database(AddDatabaseRequest {
                database_id: id.to_string(),
                database: records,
            })
            .unwrap()
    }

    #[test]
    fn test_add_merges_into_existing() {
        let mut searcher = Searcher::new(MemoryStore::new());
        add(&mut searcher, "db1", vec![Record::new("Стол", 1)]);
        let stats = add(&mut searcher, "db1", vec![Record::new("Стул", 2)]);

        assert_eq!(stats.records, 2);
        assert_eq!(searcher.open("db1").unwrap().index().record_count(), 2);
    }

    #[test]
    fn test_find_flattens_buckets() {
        let mut searcher = Searcher::new(MemoryStore::new());
        add(
            &mut searcher,
            "db1",
            vec![Record::new("Молоко", 1), Record::new("moloko", 2)],
        );

        let response = searcher
            .find_in_database(&FindRequest {
                database_id: "db1".to_string(),
                search: vec![SearchQuery::new("молоко")],
            })
            .unwrap();

        assert_eq!(
            response.response[0].results,
            vec![
                MatchedRecord {
                    name: "Молоко".to_string(),
                    id: json!(1),
                    similarity: 100
                },
                MatchedRecord {
                    name: "moloko".to_string(),
                    id: json!(2),
                    similarity: 100
                },
            ]
        );
    }

    #[test]
    fn test_find_missing_database() {
        let searcher = Searcher::new(MemoryStore::new());
        let err = searcher
            .find_in_database(&FindRequest {
                database_id: "nope".to_string(),
                search: vec![SearchQuery::new("стол")],
            })
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(err, Error::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn test_unknown_scorer_rejected_before_load() {
        let searcher = Searcher::new(MemoryStore::new());
        let err = searcher
            .find_in_database(&FindRequest {
                database_id: "nope".to_string(),
                search: vec![SearchQuery::new("стол").scorer("jaccard")],
            })
            .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_remove_database() {
        let mut searcher = Searcher::new(MemoryStore::new());
        add(&mut searcher, "db1", vec![Record::new("Стол", 1)]);
        let request = RemoveDatabaseRequest {
            database_id: "db1".to_string(),
        };

        assert!(searcher.remove_database(&request).unwrap());
        assert!(!searcher.remove_database(&request).unwrap());
        assert!(searcher.open("db1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_query_defaults() {
        let query: SearchQuery = serde_json::from_value(json!({"name": "стол"})).unwrap();
        assert_eq!(query, SearchQuery::new("стол"));
        assert_eq!(query.threshold, 100.0);
        assert_eq!(query.count, 5);
        assert_eq!(query.scorer, "default");
    }

    #[test]
    fn test_response_shape() {
        let response = FindResponse {
            database_id: "db1".to_string(),
            response: vec![QueryResult {
                search_name: "стол".to_string(),
                results: vec![MatchedRecord {
                    name: "Стол".to_string(),
                    id: json!(1),
                    similarity: 90,
                }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "databaseId": "db1",
                "response": [{
                    "searchName": "стол",
                    "results": [{"name": "Стол", "id": 1, "similarity": 90}]
                }]
            })
        );
    }

    #[test]
    fn test_min_score() {
        assert_eq!(min_score(60.0), Some(60));
        assert_eq!(min_score(60.5), Some(61));
        assert_eq!(min_score(100.0), Some(100));
        assert_eq!(min_score(-20.0), Some(0));
        assert_eq!(min_score(100.5), None);
        assert_eq!(min_score(300.0), None);
    }

    #[test]
    fn test_threshold_accepts_any_number() {
        let mut searcher = Searcher::new(MemoryStore::new());
        add(
            &mut searcher,
            "db1",
            vec![Record::new("Молоко", 1), Record::new("Стул", 2)],
        );

        let request: FindRequest = serde_json::from_value(json!({
            "databaseId": "db1",
            "search": [
                {"name": "молоко", "threshold": 60.0},
                {"name": "молоко", "threshold": 300},
                {"name": "молоко", "threshold": -5, "count": 10}
            ]
        }))
        .unwrap();
        let response = searcher.find_in_database(&request).unwrap();

        assert_eq!(response.response[0].results[0].id, json!(1));
        assert!(response.response[1].results.is_empty());
        assert_eq!(response.response[2].results.len(), 2);
    }
}
