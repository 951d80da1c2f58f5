//! LongTermStore - memory records with embeddings and similarity retrieval.
//!
//! Search is an exact scan: every record passing the [`SearchOptions`]
//! filters is scored by cosine similarity blended with importance, and the
//! top-K are returned. Ranking ([`LongTermStore::rank`]) is read-only;
//! [`LongTermStore::mark_accessed`] bumps the access metadata the retention
//! policy reads. [`LongTermStore::search`] does both.

use crate::config::{LongTermConfig, RetrievalConfig};
use crate::error::{Error, Result};
use crate::scorer::{self, ScoringWeights};
use crate::types::{MemoryRecord, MemoryType, ScoredMemory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};
use uuid::Uuid;

/// Filters and limits for a similarity search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Maximum results
    pub top_k: usize,
    /// Records below this importance are skipped
    pub min_importance: f32,
    /// Records below this cosine similarity are skipped
    pub min_similarity: Option<f32>,
    /// Only records of this type
    pub memory_type: Option<MemoryType>,
}

impl SearchOptions {
    /// Top-K above an importance floor, no other filters.
    pub fn new(top_k: usize, min_importance: f32) -> Self {
        Self {
            top_k,
            min_importance,
            min_similarity: None,
            memory_type: None,
        }
    }

    /// Add a similarity floor.
    #[must_use]
    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = Some(min_similarity);
        self
    }

    /// Restrict to one memory type.
    #[must_use]
    pub fn with_memory_type(mut self, memory_type: MemoryType) -> Self {
        self.memory_type = Some(memory_type);
        self
    }

    fn admits(&self, record: &MemoryRecord) -> bool {
        record.importance >= self.min_importance
            && self.memory_type.map_or(true, |t| t == record.memory_type)
    }
}

/// In-memory long-term store.
#[derive(Debug, Clone)]
pub struct LongTermStore {
    records: HashMap<String, MemoryRecord>,
    dimensions: usize,
    hard_ceiling: Option<usize>,
    weights: ScoringWeights,
}

/// Serialized form of the store, used for session persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongTermSnapshot {
    /// Embedding dimensionality of every record
    pub dimensions: usize,
    /// When this snapshot was taken
    pub exported_at: DateTime<Utc>,
    /// Every record, oldest first
    pub records: Vec<MemoryRecord>,
}

impl LongTermSnapshot {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON; any malformation is a deserialization error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Deserialization(format!("long-term snapshot: {e}")))
    }
}

/// Clamp into [0, 1], mapping NaN to 0.
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl LongTermStore {
    /// Create an empty store for embeddings of `dimensions` length.
    pub fn new(dimensions: usize) -> Self {
        Self {
            records: HashMap::new(),
            dimensions,
            hard_ceiling: None,
            weights: ScoringWeights::default(),
        }
    }

    /// Create a store from configuration.
    pub fn from_config(long_term: &LongTermConfig, retrieval: &RetrievalConfig) -> Self {
        info!(
            dimensions = long_term.embedding_dim,
            max_memories = long_term.max_memories,
            "Long-term store initialized"
        );
        Self::new(long_term.embedding_dim)
            .with_hard_ceiling(long_term.hard_ceiling)
            .with_weights(ScoringWeights::from(retrieval))
    }

    /// Refuse adds once the store holds `ceiling` records.
    #[must_use]
    pub fn with_hard_ceiling(mut self, ceiling: Option<usize>) -> Self {
        self.hard_ceiling = ceiling;
        self
    }

    /// Override the blend weights used by `search`.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        Ok(())
    }

    /// Store a new memory under a fresh ID. Importance is clamped to [0, 1].
    pub fn add(
        &mut self,
        content: impl Into<String>,
        memory_type: MemoryType,
        importance: f32,
        embedding: Vec<f32>,
    ) -> Result<MemoryRecord> {
        self.check_dimensions(&embedding)?;
        if let Some(ceiling) = self.hard_ceiling {
            if self.records.len() >= ceiling {
                return Err(Error::CapacityExceeded { ceiling });
            }
        }

        let mut id = Uuid::new_v4().to_string();
        while self.records.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }
        let now = Utc::now();
        let record = MemoryRecord {
            id: id.clone(),
            content: content.into(),
            embedding,
            memory_type,
            importance: clamp_unit(importance),
            created_at: now,
            last_accessed_at: now,
            access_count: 0,
            reinforcement_count: 0,
            decayed_at: None,
        };
        self.records.insert(id, record.clone());
        debug!(
            memory_id = %record.id,
            memory_type = %record.memory_type,
            importance = record.importance,
            "Added long-term memory"
        );
        Ok(record)
    }

    /// Find the `top_k` records most relevant to `query` and mark them accessed.
    ///
    /// Only records with `importance >= min_importance` are considered.
    /// Results are sorted by descending blended score; each returned record
    /// has `last_accessed_at` set to now and `access_count` incremented.
    pub fn search(
        &mut self,
        query: &[f32],
        top_k: usize,
        min_importance: f32,
    ) -> Result<Vec<ScoredMemory>> {
        self.search_with(query, &SearchOptions::new(top_k, min_importance))
    }

    /// [`search`](Self::search) with similarity and type filters.
    pub fn search_with(
        &mut self,
        query: &[f32],
        options: &SearchOptions,
    ) -> Result<Vec<ScoredMemory>> {
        let mut results = self.rank(query, options)?;
        self.mark_accessed(&mut results, Utc::now());
        Ok(results)
    }

    /// Rank records against `query` without touching access metadata.
    ///
    /// Sorted by descending score, then importance, then ID.
    pub fn rank(&self, query: &[f32], options: &SearchOptions) -> Result<Vec<ScoredMemory>> {
        self.check_dimensions(query)?;
        if options.top_k == 0 {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<(&MemoryRecord, f32, f32)> = self
            .records
            .values()
            .filter(|r| options.admits(r))
            .filter_map(|r| {
                let similarity = scorer::cosine_similarity(query, &r.embedding);
                if options.min_similarity.is_some_and(|floor| similarity < floor) {
                    return None;
                }
                let score = scorer::blended_score(&self.weights, similarity, r.importance);
                Some((r, similarity, score))
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.2.partial_cmp(&a.2)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.0.importance.partial_cmp(&a.0.importance).unwrap_or(Ordering::Equal))
                .then_with(|| a.0.id.cmp(&b.0.id))
        });
        candidates.truncate(options.top_k);

        let results: Vec<ScoredMemory> = candidates
            .into_iter()
            .map(|(record, similarity, score)| ScoredMemory {
                record: record.clone(),
                similarity,
                score,
            })
            .collect();

        debug!(
            considered = self.records.len(),
            returned = results.len(),
            min_importance = options.min_importance,
            "Long-term search complete"
        );
        Ok(results)
    }

    /// Record an access at `now` for each ranked memory still in the store.
    ///
    /// The copies in `memories` are updated to match. Returns how many
    /// records were marked.
    pub fn mark_accessed(&mut self, memories: &mut [ScoredMemory], now: DateTime<Utc>) -> usize {
        let mut marked = 0;
        for memory in memories.iter_mut() {
            if let Some(record) = self.records.get_mut(&memory.record.id) {
                record.last_accessed_at = now;
                record.access_count = record.access_count.saturating_add(1);
                memory.record.last_accessed_at = record.last_accessed_at;
                memory.record.access_count = record.access_count;
                marked += 1;
            }
        }
        marked
    }

    /// Point lookup.
    pub fn get(&self, id: &str) -> Option<&MemoryRecord> {
        self.records.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut MemoryRecord> {
        self.records.get_mut(id)
    }

    /// Hard delete. Removing an unknown ID is a no-op returning `None`.
    pub fn remove(&mut self, id: &str) -> Option<MemoryRecord> {
        let removed = self.records.remove(id);
        if removed.is_some() {
            debug!(memory_id = id, "Removed long-term memory");
        }
        removed
    }

    /// Set a record's importance (clamped). Returns the previous value.
    pub fn update_importance(&mut self, id: &str, importance: f32) -> Option<f32> {
        let record = self.records.get_mut(id)?;
        let old = record.importance;
        record.importance = clamp_unit(importance);
        Some(old)
    }

    /// Replace a record's content and embedding.
    ///
    /// Importance and retention metadata are kept. Returns the updated
    /// record, or `None` for an unknown ID.
    pub fn update_content(
        &mut self,
        id: &str,
        content: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Result<Option<MemoryRecord>> {
        self.check_dimensions(&embedding)?;
        let Some(record) = self.records.get_mut(id) else {
            return Ok(None);
        };
        record.content = content.into();
        record.embedding = embedding;
        debug!(memory_id = id, "Updated memory content");
        Ok(Some(record.clone()))
    }

    /// Every record of one type, oldest first.
    pub fn all_by_type(&self, memory_type: MemoryType) -> Vec<&MemoryRecord> {
        let mut out: Vec<&MemoryRecord> = self
            .records
            .values()
            .filter(|r| r.memory_type == memory_type)
            .collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        out
    }

    /// Record count per type; types with no records are omitted.
    pub fn counts_by_type(&self) -> BTreeMap<MemoryType, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records.values() {
            *counts.entry(record.memory_type).or_insert(0) += 1;
        }
        counts
    }

    /// All records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.records.values()
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut MemoryRecord> {
        self.records.values_mut()
    }

    /// All IDs, in no particular order.
    pub fn ids(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimensionality.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Capture every record.
    pub fn export_snapshot(&self) -> LongTermSnapshot {
        let mut records: Vec<MemoryRecord> = self.records.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        LongTermSnapshot {
            dimensions: self.dimensions,
            exported_at: Utc::now(),
            records,
        }
    }

    /// Replace the store's contents with a snapshot.
    ///
    /// Validates dimensionality, importance range and ID uniqueness before
    /// touching current state. Returns the number of records imported.
    pub fn import_snapshot(&mut self, snapshot: LongTermSnapshot) -> Result<usize> {
        if snapshot.dimensions != self.dimensions {
            return Err(Error::Deserialization(format!(
                "snapshot dimensions {} do not match store dimensions {}",
                snapshot.dimensions, self.dimensions
            )));
        }

        let mut records = HashMap::with_capacity(snapshot.records.len());
        for record in snapshot.records {
            if record.id.is_empty() {
                return Err(Error::Deserialization("memory with empty id".into()));
            }
            if record.embedding.len() != self.dimensions {
                return Err(Error::Deserialization(format!(
                    "memory {} has {} dimensions, expected {}",
                    record.id,
                    record.embedding.len(),
                    self.dimensions
                )));
            }
            if !(0.0..=1.0).contains(&record.importance) {
                return Err(Error::Deserialization(format!(
                    "memory {} has importance {} outside [0, 1]",
                    record.id, record.importance
                )));
            }
            if records.contains_key(&record.id) {
                return Err(Error::Deserialization(format!(
                    "duplicate memory id: {}",
                    record.id
                )));
            }
            records.insert(record.id.clone(), record);
        }

        self.records = records;
        info!(count = self.records.len(), "Imported long-term snapshot");
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LongTermStore {
        LongTermStore::new(3)
    }

    #[test]
    fn test_add_and_get() {
        let mut store = store();
        let record = store
            .add("User likes jazz", MemoryType::Preference, 0.8, vec![1.0, 0.0, 0.0])
            .unwrap();

        let got = store.get(&record.id).unwrap();
        assert_eq!(got.content, "User likes jazz");
        assert_eq!(got.access_count, 0);
        assert_eq!(got.created_at, got.last_accessed_at);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_add_clamps_importance() {
        let mut store = store();
        let high = store.add("a", MemoryType::Fact, 1.7, vec![1.0, 0.0, 0.0]).unwrap();
        let low = store.add("b", MemoryType::Fact, -0.2, vec![1.0, 0.0, 0.0]).unwrap();
        let nan = store.add("c", MemoryType::Fact, f32::NAN, vec![1.0, 0.0, 0.0]).unwrap();
        assert_eq!(high.importance, 1.0);
        assert_eq!(low.importance, 0.0);
        assert_eq!(nan.importance, 0.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = store();
        let mut ids = std::collections::HashSet::new();
        for i in 0..50 {
            let r = store
                .add(format!("m{i}"), MemoryType::Conversation, 0.5, vec![0.0, 1.0, 0.0])
                .unwrap();
            assert!(ids.insert(r.id.clone()));
            if i % 2 == 0 {
                store.remove(&r.id);
            }
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut store = store();
        let err = store
            .add("x", MemoryType::Fact, 0.5, vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 3, actual: 2 }));
        assert!(store.search(&[1.0], 5, 0.0).is_err());
    }

    #[test]
    fn test_hard_ceiling() {
        let mut store = store().with_hard_ceiling(Some(1));
        store.add("a", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();
        let err = store.add("b", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { ceiling: 1 }));
    }

    #[test]
    fn test_search_ranks_by_blended_score() {
        let mut store = store();
        let close = store
            .add("close", MemoryType::Fact, 0.5, vec![1.0, 0.1, 0.0])
            .unwrap();
        let far = store
            .add("far", MemoryType::Fact, 1.0, vec![0.0, 1.0, 0.0])
            .unwrap();
        let exact = store
            .add("exact", MemoryType::Fact, 0.2, vec![1.0, 0.0, 0.0])
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], 3, 0.0).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        // Similarity dominates: the orthogonal high-importance memory is last
        assert_eq!(results[2].record.id, far.id);
        assert!([close.id.as_str(), exact.id.as_str()].contains(&results[0].record.id.as_str()));
    }

    #[test]
    fn test_search_importance_tie_break() {
        let mut store = store();
        let low = store.add("low", MemoryType::Fact, 0.2, vec![1.0, 0.0, 0.0]).unwrap();
        let high = store.add("high", MemoryType::Fact, 0.9, vec![1.0, 0.0, 0.0]).unwrap();
        let results = store.search(&[1.0, 0.0, 0.0], 2, 0.0).unwrap();
        assert_eq!(results[0].record.id, high.id);
        assert_eq!(results[1].record.id, low.id);
    }

    #[test]
    fn test_search_honors_importance_floor() {
        let mut store = store();
        for i in 0..4 {
            store
                .add(format!("weak {i}"), MemoryType::Conversation, 0.2, vec![1.0, 0.0, 0.0])
                .unwrap();
        }
        let results = store.search(&[1.0, 0.0, 0.0], 5, 0.3).unwrap();
        assert!(results.is_empty());

        let strong = store.add("strong", MemoryType::Fact, 0.3, vec![0.0, 0.0, 1.0]).unwrap();
        let results = store.search(&[1.0, 0.0, 0.0], 5, 0.3).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.id, strong.id);
    }

    #[test]
    fn test_search_top_k_and_access_tracking() {
        let mut store = store();
        for i in 0..5 {
            store
                .add(format!("m{i}"), MemoryType::Fact, 0.5, vec![1.0, i as f32, 0.0])
                .unwrap();
        }
        let results = store.search(&[1.0, 0.0, 0.0], 2, 0.0).unwrap();
        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.record.access_count, 1);
            let stored = store.get(&r.record.id).unwrap();
            assert_eq!(stored.access_count, 1);
            assert!(stored.last_accessed_at >= stored.created_at);
        }
        let untouched = store.records().filter(|r| r.access_count == 0).count();
        assert_eq!(untouched, 3);

        assert!(store.search(&[1.0, 0.0, 0.0], 0, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_rank_does_not_touch_access() {
        let mut store = store();
        let r = store.add("a", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();
        let mut ranked = store.rank(&[1.0, 0.0, 0.0], &SearchOptions::new(5, 0.0)).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(store.get(&r.id).unwrap().access_count, 0);

        store.remove(&r.id);
        assert_eq!(store.mark_accessed(&mut ranked, Utc::now()), 0);
        assert_eq!(ranked[0].record.access_count, 0);
    }

    #[test]
    fn test_search_similarity_floor_and_type_filter() {
        let mut store = store();
        let fact = store.add("fact", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();
        let pref = store
            .add("pref", MemoryType::Preference, 0.5, vec![1.0, 1.0, 0.0])
            .unwrap();
        store.add("far", MemoryType::Fact, 0.5, vec![0.0, 0.0, 1.0]).unwrap();
        let query = [1.0, 0.0, 0.0];

        let floored = store
            .search_with(&query, &SearchOptions::new(5, 0.0).with_min_similarity(0.5))
            .unwrap();
        let ids: Vec<&str> = floored.iter().map(|m| m.record.id.as_str()).collect();
        assert_eq!(ids, vec![fact.id.as_str(), pref.id.as_str()]);
        assert!(floored.iter().all(|m| m.similarity >= 0.5));

        let prefs = store
            .search_with(
                &query,
                &SearchOptions::new(5, 0.0).with_memory_type(MemoryType::Preference),
            )
            .unwrap();
        assert_eq!(prefs.len(), 1);
        assert_eq!(prefs[0].record.id, pref.id);
    }

    #[test]
    fn test_update_content() {
        let mut store = store();
        let r = store.add("likes tea", MemoryType::Preference, 0.6, vec![0.0, 1.0, 0.0]).unwrap();

        let updated = store
            .update_content(&r.id, "likes coffee", vec![1.0, 0.0, 0.0])
            .unwrap()
            .unwrap();
        assert_eq!(updated.content, "likes coffee");
        assert_eq!(updated.importance, 0.6);
        assert_eq!(updated.created_at, r.created_at);

        let results = store.search(&[1.0, 0.0, 0.0], 1, 0.0).unwrap();
        assert_eq!(results[0].record.content, "likes coffee");

        assert!(store.update_content("missing", "x", vec![1.0, 0.0, 0.0]).unwrap().is_none());
        assert!(matches!(
            store.update_content(&r.id, "x", vec![1.0]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = store();
        let r = store.add("a", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();
        assert!(store.remove(&r.id).is_some());
        assert!(store.remove(&r.id).is_none());
        assert!(store.remove("never-existed").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_all_by_type_and_counts() {
        let mut store = store();
        store.add("f1", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();
        store.add("p1", MemoryType::Preference, 0.5, vec![1.0, 0.0, 0.0]).unwrap();
        store.add("f2", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();

        assert_eq!(store.all_by_type(MemoryType::Fact).len(), 2);
        assert!(store.all_by_type(MemoryType::Persona).is_empty());

        let counts = store.counts_by_type();
        assert_eq!(counts.get(&MemoryType::Fact), Some(&2));
        assert_eq!(counts.get(&MemoryType::Preference), Some(&1));
        assert_eq!(counts.get(&MemoryType::Persona), None);
    }

    #[test]
    fn test_update_importance() {
        let mut store = store();
        let r = store.add("a", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();
        assert_eq!(store.update_importance(&r.id, 2.0), Some(0.5));
        assert_eq!(store.get(&r.id).unwrap().importance, 1.0);
        assert_eq!(store.update_importance("missing", 0.1), None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut store = store();
        store.add("a", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();
        store.add("b", MemoryType::Persona, 0.9, vec![0.0, 0.5, 0.5]).unwrap();

        let json = store.export_snapshot().to_json().unwrap();
        let mut restored = LongTermStore::new(3);
        assert_eq!(
            restored
                .import_snapshot(LongTermSnapshot::from_json(&json).unwrap())
                .unwrap(),
            2
        );
        for record in store.records() {
            assert_eq!(restored.get(&record.id), Some(record));
        }
    }

    #[test]
    fn test_invalid_snapshot_leaves_state_untouched() {
        let mut store = store();
        let kept = store.add("keep", MemoryType::Fact, 0.5, vec![1.0, 0.0, 0.0]).unwrap();

        let mut snapshot = store.export_snapshot();
        snapshot.records[0].importance = 1.5;
        assert!(matches!(
            store.import_snapshot(snapshot),
            Err(Error::Deserialization(_))
        ));

        let mut snapshot = store.export_snapshot();
        snapshot.records[0].embedding = vec![1.0];
        assert!(store.import_snapshot(snapshot).is_err());

        let mut snapshot = store.export_snapshot();
        let dup = snapshot.records[0].clone();
        snapshot.records.push(dup);
        assert!(store.import_snapshot(snapshot).is_err());

        assert!(store.import_snapshot(LongTermStore::new(4).export_snapshot()).is_err());
        assert!(LongTermSnapshot::from_json("{\"records\": 3}").is_err());

        assert_eq!(store.len(), 1);
        assert!(store.get(&kept.id).is_some());
    }
}
