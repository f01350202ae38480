//! FuzzyIndex - phonetic buckets with scored search

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ahash::AHasher;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::strategies::Scorer;
use crate::normalize::{Normalizer, PhoneticKey};
use crate::record::Record;

/// One matched bucket: every record in it shares `score`.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketMatch<'a> {
    pub key: &'a str,
    pub records: &'a [Record],
    pub score: u8,
}

/// Index configuration
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Key count at which scoring fans out across threads (`parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1000,
        }
    }
}

/// Counts and fingerprint of an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub keys: usize,
    pub records: usize,
    pub hash: String,
}

/// Serializable key -> records mapping of one index.
///
/// Key order is insertion order and survives a serde roundtrip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexSnapshot {
    buckets: IndexMap<PhoneticKey, Vec<Record>>,
}

impl IndexSnapshot {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Records bucketed by the phonetic key of their name.
///
/// Buckets keep insertion order, and so do records inside a bucket. Search
/// ties resolve by bucket insertion order.
#[derive(Debug)]
pub struct FuzzyIndex {
    buckets: IndexMap<PhoneticKey, Vec<Record>>,
    normalizer: Arc<Normalizer>,
    config: IndexConfig,
}

impl Default for FuzzyIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyIndex {
    /// Create an empty index with the default normalizer
    pub fn new() -> Self {
        Self::with_normalizer(Arc::new(Normalizer::default()), IndexConfig::default())
    }

    /// Create an empty index sharing `normalizer`
    pub fn with_normalizer(normalizer: Arc<Normalizer>, config: IndexConfig) -> Self {
        Self {
            buckets: IndexMap::new(),
            normalizer,
            config,
        }
    }

    /// Restore an index from a snapshot. Keys are taken as stored.
    pub fn from_snapshot(
        snapshot: IndexSnapshot,
        normalizer: Arc<Normalizer>,
        config: IndexConfig,
    ) -> Self {
        Self {
            buckets: snapshot.buckets,
            normalizer,
            config,
        }
    }

    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            buckets: self.buckets.clone(),
        }
    }

    pub fn into_snapshot(self) -> IndexSnapshot {
        IndexSnapshot {
            buckets: self.buckets,
        }
    }

    /// Append `record` to the bucket of its normalized name.
    pub fn insert(&mut self, record: Record) {
        let key = self.normalizer.normalize(&record.name);
        self.buckets.entry(key).or_default().push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        for record in records {
            self.insert(record);
        }
    }

    /// Score `query` against every key and return the best buckets.
    ///
    /// Keeps the `max_results` best keys (score descending, ties in key
    /// insertion order), then drops those scoring below `threshold`.
    pub fn search(
        &self,
        query: &str,
        threshold: u8,
        max_results: usize,
        scorer: Scorer,
    ) -> Vec<BucketMatch<'_>> {
        if max_results == 0 || self.buckets.is_empty() {
            return Vec::new();
        }
        let query_key = self.normalizer.normalize(query);
        if query_key.is_empty() {
            return Vec::new();
        }

        let scores = self.score_keys(&query_key, scorer);

        let mut ranked: Vec<(usize, u8)> = scores.into_iter().enumerate().collect();
        // stable: equal scores keep key order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(max_results);

        ranked
            .into_iter()
            .filter(|(_, score)| *score >= threshold)
            .filter_map(|(idx, score)| {
                self.buckets
                    .get_index(idx)
                    .map(|(key, records)| BucketMatch {
                        key: key.as_str(),
                        records: records.as_slice(),
                        score,
                    })
            })
            .collect()
    }

    /// Score every key, parallel above the threshold
    #[cfg(feature = "parallel")]
    fn score_keys(&self, query_key: &str, scorer: Scorer) -> Vec<u8> {
        if self.buckets.len() >= self.config.parallel_threshold {
            let keys: Vec<&str> = self.buckets.keys().map(String::as_str).collect();
            keys.par_iter()
                .map(|key| scorer.score(query_key, key))
                .collect()
        } else {
            self.score_sequential(query_key, scorer)
        }
    }

    /// Sequential scoring when parallel feature disabled
    #[cfg(not(feature = "parallel"))]
    fn score_keys(&self, query_key: &str, scorer: Scorer) -> Vec<u8> {
        self.score_sequential(query_key, scorer)
    }

    fn score_sequential(&self, query_key: &str, scorer: Scorer) -> Vec<u8> {
        self.buckets
            .keys()
            .map(|key| scorer.score(query_key, key))
            .collect()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Phonetic key `text` would be filed under.
    pub fn key_for(&self, text: &str) -> PhoneticKey {
        self.normalizer.normalize(text)
    }

    /// Records filed under `key`.
    pub fn get(&self, key: &str) -> Option<&[Record]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            keys: self.len(),
            records: self.record_count(),
            hash: self.compute_hash(),
        }
    }

    /// Fingerprint of keys and bucket sizes, in order
    fn compute_hash(&self) -> String {
        let mut hasher = AHasher::default();
        for (key, records) in &self.buckets {
            key.hash(&mut hasher);
            records.len().hash(&mut hasher);
        }
        format!("{:016x}", hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_index() -> FuzzyIndex {
        let mut index = FuzzyIndex::new();
        index.extend(vec![
            Record::new("Стол 10x5см", 1),
            Record::new("Стул деревянный", 2),
            Record::new("Молоко", 3),
            Record::new("moloko", 4),
            Record::new("Хлеб белый", 5),
        ]);
        index
    }

    #[test]
    fn test_bucketing() {
        let index = test_index();
        assert_eq!(index.len(), 4);
        assert_eq!(index.record_count(), 5);

        let key = index.key_for("молоко");
        let ids: Vec<_> = index.get(&key).unwrap().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![serde_json::json!(3), serde_json::json!(4)]);
    }

    #[test]
    fn test_bucket_shares_score() {
        let index = test_index();
        let hits = index.search("малако", 0, 10, Scorer::Weighted);
        assert_eq!(hits[0].score, 100);
        assert_eq!(hits[0].records.len(), 2);
    }

    #[test]
    fn test_dimension_query() {
        let index = test_index();
        let hits = index.search("стол 50", 60, 5, Scorer::Weighted);
        assert!(!hits.is_empty());
        assert_eq!(hits[0].records[0].name, "Стол 10x5см");
        assert!(hits[0].score >= 60);
    }

    #[test]
    fn test_results_sorted_and_limited() {
        let index = test_index();
        let hits = index.search("стул", 0, 3, Scorer::Simple);
        assert_eq!(hits.len(), 3);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_threshold_100_is_exact_only() {
        let index = test_index();
        let hits = index.search("Хлеб белый", 100, 10, Scorer::Simple);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, index.key_for("Хлеб белый"));
    }

    #[test]
    fn test_raising_threshold_never_grows() {
        let index = test_index();
        for scorer in Scorer::ALL {
            let mut previous = usize::MAX;
            for threshold in [0u8, 20, 40, 60, 80, 100] {
                let n = index.search("стул дерево", threshold, 10, scorer).len();
                assert!(n <= previous);
                previous = n;
            }
        }
    }

    #[test]
    fn test_ties_follow_insertion_order() {
        let mut index = FuzzyIndex::new();
        index.extend(vec![
            Record::new("дом", "first"),
            Record::new("ком", "second"),
            Record::new("лом", "third"),
        ]);
        let hits = index.search("сом", 0, 10, Scorer::Simple);
        let order: Vec<_> = hits.iter().map(|h| h.records[0].id.clone()).collect();
        assert_eq!(
            order,
            vec![
                serde_json::json!("first"),
                serde_json::json!("second"),
                serde_json::json!("third")
            ]
        );
        assert_eq!(hits, index.search("сом", 0, 10, Scorer::Simple));
    }

    #[test]
    fn test_empty_query_and_index() {
        let index = test_index();
        assert!(index.search("", 0, 10, Scorer::Weighted).is_empty());
        assert!(index.search("!!!", 0, 10, Scorer::Weighted).is_empty());
        assert!(index.search("стол", 0, 0, Scorer::Weighted).is_empty());
        assert!(FuzzyIndex::new().search("стол", 0, 10, Scorer::Weighted).is_empty());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let index = test_index();
        let json = serde_json::to_string(&index.snapshot()).unwrap();
        let snapshot: IndexSnapshot = serde_json::from_str(&json).unwrap();
        let restored =
            FuzzyIndex::from_snapshot(snapshot, Arc::new(Normalizer::default()), IndexConfig::default());

        assert_eq!(restored.keys().collect::<Vec<_>>(), index.keys().collect::<Vec<_>>());
        for scorer in Scorer::ALL {
            assert_eq!(
                restored.search("стул", 0, 10, scorer),
                index.search("стул", 0, 10, scorer)
            );
        }
    }

    #[test]
    fn test_stats_hash_changes() {
        let mut index = test_index();
        let before = index.stats();
        index.insert(Record::new("Новый", 9));
        let after = index.stats();

        assert_eq!(after.records, before.records + 1);
        assert_ne!(before.hash, after.hash);
        assert_eq!(after.hash, index.stats().hash);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let records = vec![
            Record::new("Стол 10x5см", 1),
            Record::new("Стул деревянный", 2),
            Record::new("Молоко", 3),
            Record::new("moloko", 4),
            Record::new("Хлеб белый", 5),
            Record::new("Шкаф IKEA", 6),
            Record::new("Кресло 60х60", 7),
            Record::new("Полка 3 яруса", 8),
            Record::new("дом", 9),
            Record::new("ком", 10),
        ];
        let build = |parallel_threshold| {
            let mut index = FuzzyIndex::with_normalizer(
                Arc::new(Normalizer::default()),
                IndexConfig { parallel_threshold },
            );
            index.extend(records.clone());
            index
        };
        let parallel = build(1);
        let sequential = build(usize::MAX);

        for scorer in Scorer::ALL {
            for query in ["стол", "малако", "шкаф икеа", "сом", "кресло 3600"] {
                assert_eq!(
                    parallel.search(query, 0, 10, scorer),
                    sequential.search(query, 0, 10, scorer)
                );
            }
        }
    }
}
