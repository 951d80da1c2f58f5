//! MemoryManager - facade over the short-term and long-term stores.
//!
//! The manager is the only holder of both stores. Each store sits behind
//! its own `tokio::sync::RwLock`: writers (`append`, `add`, `remove`, decay)
//! are exclusive, reads (`get`, stats, ranking) run concurrently. A search
//! ranks under the read lock, then takes the write lock only to stamp
//! access metadata on the memories it hands back. When both locks are
//! needed they are taken short-term first.
//!
//! Embeddings are computed before any lock is taken, under the configured
//! timeout. A timeout while promoting a turn skips the promotion; the turn
//! itself is already recorded.

use crate::classifier::{KeywordClassifier, PersistClassifier};
use crate::config::MemoryConfig;
use crate::context::PromptContext;
use crate::embedding::Embedder;
use crate::error::{Error, Result};
use crate::events::{
    AddMemoryDetails, ApplyDecayDetails, EventBus, EvictDetails, ForgetDetails, MemoryEvent,
    Operation, OperationEntry, OperationLog, OperationType, ReinforceDetails,
    RetrieveDetails, UpdateImportanceDetails, UpdateMemoryDetails,
};
use crate::long_term::{clamp_unit, LongTermStore, SearchOptions};
use crate::persistence::SessionDir;
use crate::retention::{DecayReport, RetentionPolicy};
use crate::short_term::ShortTermStore;
use crate::stats::MemoryStats;
use crate::types::{
    estimate_tokens, preview, ConversationTurn, MemoryRecord, MemoryType, ScoredMemory,
};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};


/// What happened to a turn's long-term promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promotion {
    /// Stored as a new memory with this ID
    Promoted(String),
    /// The classifier declined, or the turn is a system turn
    NotSelected,
    /// The embedder timed out; only the short-term append happened
    SkippedTimeout,
    /// Stored, then removed by the capacity pass it triggered because it
    /// ranked below every retained memory
    EvictedOnAdd(String),
}

/// Result of [`MemoryManager::record_turn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// ID of the recorded turn
    pub turn_id: String,
    /// ID of the turn evicted from the short-term buffer, if any
    pub evicted_turn: Option<String>,
    /// Long-term promotion result
    pub promotion: Promotion,
}

/// Coordinates both stores, retention, and the event stream.
pub struct MemoryManager {
    config: MemoryConfig,
    short_term: RwLock<ShortTermStore>,
    long_term: RwLock<LongTermStore>,
    retention: RetentionPolicy,
    embedder: Arc<dyn Embedder>,
    classifier: Arc<dyn PersistClassifier>,
    events: EventBus,
    operations: Mutex<OperationLog>,
}

impl MemoryManager {
    /// Create a manager with empty stores and the keyword classifier.
    ///
    /// Fails when the configuration is invalid or the embedder's
    /// dimensionality differs from `long_term.embedding_dim`.
    pub fn new(config: MemoryConfig, embedder: Arc<dyn Embedder>) -> Result<Self> {
        config.validate()?;
        if embedder.dimensions() != config.long_term.embedding_dim {
            return Err(Error::DimensionMismatch {
                expected: config.long_term.embedding_dim,
                actual: embedder.dimensions(),
            });
        }

        let short_term = ShortTermStore::new(config.short_term.max_turns);
        let long_term = LongTermStore::from_config(&config.long_term, &config.retrieval);
        let classifier = Arc::new(KeywordClassifier::new(config.retention.promotion_threshold));

        info!(
            embedder = embedder.name(),
            max_turns = config.short_term.max_turns,
            max_memories = config.long_term.max_memories,
            "Memory manager initialized"
        );
        Ok(Self {
            retention: RetentionPolicy::new(config.retention.clone()),
            events: EventBus::from_config(&config.debug),
            operations: Mutex::new(OperationLog::new(config.debug.operation_log_capacity)),
            short_term: RwLock::new(short_term),
            long_term: RwLock::new(long_term),
            embedder,
            classifier,
            config,
        })
    }

    /// Replace the promotion classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn PersistClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Background maintenance period, `None` when disabled.
    pub fn maintenance_interval(&self) -> Option<std::time::Duration> {
        self.config.retention.maintenance_interval()
    }

    // ── Turn pipeline ──────────────────────────────────────────

    /// Record a completed turn and promote it if the classifier selects it.
    ///
    /// The short-term append always happens first. A promotion timeout is
    /// reported as [`Promotion::SkippedTimeout`]; any other embedder or
    /// store error propagates with the turn already recorded.
    pub async fn record_turn(&self, turn: ConversationTurn) -> Result<TurnOutcome> {
        let turn_id = turn.id.clone();
        let pinned = turn.is_pinned();
        let text = turn.text.clone();

        let evicted_turn = self.short_term.write().await.append(turn).map(|t| t.id);
        debug!(turn_id = %turn_id, pinned, "Recorded turn");

        let mut outcome = TurnOutcome {
            turn_id,
            evicted_turn,
            promotion: Promotion::NotSelected,
        };
        if pinned || !self.classifier.should_persist(&text) {
            return Ok(outcome);
        }

        let assessment = self.classifier.assess(&text);
        let embedding = match self.embed(&text).await {
            Ok(embedding) => embedding,
            Err(Error::EmbeddingTimeout { timeout_ms }) => {
                warn!(turn_id = %outcome.turn_id, timeout_ms, "Embedding timed out, promotion skipped");
                outcome.promotion = Promotion::SkippedTimeout;
                return Ok(outcome);
            }
            Err(e) => return Err(e),
        };

        let (record, retained) = self
            .store_memory(text, assessment.memory_type, assessment.importance, embedding, true)
            .await?;
        outcome.promotion = if retained {
            Promotion::Promoted(record.id)
        } else {
            Promotion::EvictedOnAdd(record.id)
        };
        Ok(outcome)
    }

    /// Build a prompt context within `token_budget` for `query_text`.
    ///
    /// Recent turns take priority. Retrieved memories then fill what is
    /// left in descending score order; a memory that does not fit the
    /// remaining budget is skipped whole and does not count as accessed. An
    /// embedding timeout yields a context without memories.
    pub async fn build_prompt_context(
        &self,
        token_budget: u32,
        query_text: &str,
    ) -> Result<PromptContext> {
        let slice = self.short_term.read().await.build_context(token_budget);
        let mut context = PromptContext {
            turn_tokens: slice.total_tokens,
            overflow: slice.overflow,
            turns: slice.turns,
            ..PromptContext::default()
        };

        let mut remaining = token_budget.saturating_sub(context.turn_tokens);
        if remaining == 0 || query_text.trim().is_empty() {
            return Ok(context);
        }

        let query = match self.embed(query_text).await {
            Ok(query) => query,
            Err(Error::EmbeddingTimeout { timeout_ms }) => {
                warn!(timeout_ms, "Embedding timed out, building context without memories");
                return Ok(context);
            }
            Err(e) => return Err(e),
        };

        let options = self.retrieval_options();
        let ranked = self.rank(&query, &options).await?;

        for memory in ranked {
            let tokens = estimate_tokens(&memory.record.content);
            if tokens > remaining {
                debug!(memory_id = %memory.record.id, tokens, remaining, "Memory skipped, over budget");
                continue;
            }
            remaining -= tokens;
            context.memory_tokens += tokens;
            context.memories.push(memory);
        }
        self.record_retrieval(query_text, &options, &mut context.memories)
            .await;

        debug!(
            turns = context.turns.len(),
            memories = context.memories.len(),
            total_tokens = context.total_tokens(),
            token_budget,
            "Built prompt context"
        );
        Ok(context)
    }

    /// Build a prompt context with the configured default budget.
    pub async fn build_default_prompt_context(&self, query_text: &str) -> Result<PromptContext> {
        self.build_prompt_context(self.config.short_term.default_token_budget, query_text)
            .await
    }

    // ── Long-term operations ───────────────────────────────────

    /// Store content directly in long-term memory.
    ///
    /// Returns `None` when the store was at capacity and the new memory
    /// ranked below every retained one, so the eviction it triggered removed
    /// it again. Unlike promotion, an embedding timeout here is an error.
    pub async fn remember(
        &self,
        content: impl Into<String>,
        memory_type: MemoryType,
        importance: f32,
    ) -> Result<Option<MemoryRecord>> {
        let content = content.into();
        let embedding = self.embed(&content).await?;
        let (record, retained) = self
            .store_memory(content, memory_type, importance, embedding, false)
            .await?;
        Ok(retained.then_some(record))
    }

    /// Similarity search with explicit parameters.
    pub async fn search(
        &self,
        query_text: &str,
        top_k: usize,
        min_importance: f32,
    ) -> Result<Vec<ScoredMemory>> {
        self.search_with(query_text, SearchOptions::new(top_k, min_importance))
            .await
    }

    /// Similarity search with a similarity floor and type filter.
    pub async fn search_with(
        &self,
        query_text: &str,
        options: SearchOptions,
    ) -> Result<Vec<ScoredMemory>> {
        let query = self.embed(query_text).await?;
        let mut results = self.rank(&query, &options).await?;
        self.record_retrieval(query_text, &options, &mut results)
            .await;
        Ok(results)
    }

    /// Replace a memory's content, re-embedding it.
    ///
    /// Importance and retention metadata are kept. Returns `None` for an
    /// unknown ID; the embedder still runs first.
    pub async fn update_memory(
        &self,
        id: &str,
        content: impl Into<String>,
    ) -> Result<Option<MemoryRecord>> {
        let content = content.into();
        let embedding = self.embed(&content).await?;
        let content_preview = preview(&content);
        let updated = self
            .long_term
            .write()
            .await
            .update_content(id, content, embedding)?;
        if updated.is_some() {
            info!(memory_id = id, "Memory content updated");
        }
        self.log_operation(Operation::UpdateMemory(UpdateMemoryDetails {
            memory_id: id.to_string(),
            content_preview,
            updated: updated.is_some(),
        }));
        Ok(updated)
    }

    /// Point lookup. Does not count as an access.
    pub async fn get(&self, id: &str) -> Option<MemoryRecord> {
        self.long_term.read().await.get(id).cloned()
    }

    /// Remove a memory. Returns whether it existed.
    pub async fn forget(&self, id: &str) -> bool {
        let removed = self.long_term.write().await.remove(id).is_some();
        if removed {
            info!(memory_id = id, "Memory forgotten");
        }
        self.log_operation(Operation::Forget(ForgetDetails {
            memory_id: id.to_string(),
            removed,
        }));
        removed
    }

    /// Raise a memory's importance. Returns the new importance.
    pub async fn reinforce(&self, id: &str, strength: f32) -> Option<f32> {
        let new_importance = {
            let mut store = self.long_term.write().await;
            self.retention.reinforce(&mut store, id, strength)
        };
        self.log_operation(Operation::Reinforce(ReinforceDetails {
            memory_id: id.to_string(),
            strength,
            new_importance,
        }));
        new_importance
    }

    /// Set a memory's importance. Returns the previous importance.
    pub async fn update_importance(&self, id: &str, importance: f32) -> Option<f32> {
        let old_importance = self.long_term.write().await.update_importance(id, importance);
        self.log_operation(Operation::UpdateImportance(UpdateImportanceDetails {
            memory_id: id.to_string(),
            old_importance,
            new_importance: clamp_unit(importance),
        }));
        old_importance
    }

    /// Decay every memory to `now`, forgetting those below the threshold.
    pub async fn apply_decay(&self, now: DateTime<Utc>) -> DecayReport {
        let report = {
            let mut store = self.long_term.write().await;
            self.retention.apply_decay(&mut store, now)
        };
        self.log_operation(Operation::ApplyDecay(ApplyDecayDetails {
            decayed: report.decayed,
            forgotten: report.forgotten.clone(),
        }));
        report
    }

    /// Evict down to `long_term.max_memories`. Returns the evicted IDs.
    pub async fn evict_to_capacity(&self) -> Vec<String> {
        let max_memories = self.config.long_term.max_memories;
        let evicted = {
            let mut store = self.long_term.write().await;
            self.retention.evict_to_capacity(&mut store, max_memories)
        };
        self.log_operation(Operation::Evict(EvictDetails {
            max_memories,
            evicted: evicted.clone(),
        }));
        evicted
    }

    // ── Short-term operations ──────────────────────────────────

    /// Drop every buffered turn. Returns how many were dropped.
    pub async fn reset_short_term(&self) -> usize {
        self.short_term.write().await.clear()
    }

    /// Copy of the buffered turns, oldest first.
    pub async fn recent_turns(&self) -> Vec<ConversationTurn> {
        self.short_term.read().await.turns().cloned().collect()
    }

    // ── Observability ──────────────────────────────────────────

    /// Compute a stats snapshot.
    pub async fn stats(&self) -> MemoryStats {
        let short_term = self.short_term.read().await;
        let long_term = self.long_term.read().await;
        let log = self.operations.lock().unwrap_or_else(|e| e.into_inner());
        MemoryStats::collect(
            &short_term,
            &long_term,
            self.config.long_term.max_memories,
            &log,
        )
    }

    /// Compute a stats snapshot and publish it as a `memory_stats` event.
    pub async fn publish_stats(&self) -> MemoryStats {
        let stats = self.stats().await;
        self.events.stats(stats.clone());
        stats
    }

    /// The most recent `limit` logged operations, optionally of one type.
    pub fn operations(&self, filter: Option<OperationType>, limit: usize) -> Vec<OperationEntry> {
        self.operations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .recent(filter, limit)
    }

    /// Receiver for all future memory events.
    pub fn subscribe(&self) -> broadcast::Receiver<MemoryEvent> {
        self.events.subscribe()
    }

    // ── Persistence ────────────────────────────────────────────

    /// Write both stores to `dir`.
    pub async fn save_session(&self, dir: impl AsRef<Path>) -> Result<()> {
        let (short_snapshot, long_snapshot) = {
            let short_term = self.short_term.read().await;
            let long_term = self.long_term.read().await;
            (short_term.export_snapshot(), long_term.export_snapshot())
        };
        SessionDir::new(dir.as_ref())
            .write(&short_snapshot, &long_snapshot)
            .await
    }

    /// Replace both stores with the session saved in `dir`.
    ///
    /// Both documents are parsed and validated before either store changes.
    /// Returns `(turns, memories)` loaded.
    pub async fn load_session(&self, dir: impl AsRef<Path>) -> Result<(usize, usize)> {
        let (short_snapshot, long_snapshot) = SessionDir::new(dir.as_ref()).read().await?;

        let mut short_term = ShortTermStore::new(self.config.short_term.max_turns);
        let turns = short_term.import_snapshot(short_snapshot)?;
        let mut long_term =
            LongTermStore::from_config(&self.config.long_term, &self.config.retrieval);
        let memories = long_term.import_snapshot(long_snapshot)?;

        {
            let mut short_guard = self.short_term.write().await;
            let mut long_guard = self.long_term.write().await;
            *short_guard = short_term;
            *long_guard = long_term;
        }
        info!(
            dir = %dir.as_ref().display(),
            turns,
            memories,
            "Session loaded"
        );
        Ok((turns, memories))
    }

    // ── Internals ──────────────────────────────────────────────

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let timeout = self.config.embedding.timeout();
        match tokio::time::timeout(timeout, self.embedder.embed(text)).await {
            Ok(result) => result,
            Err(_) => Err(Error::EmbeddingTimeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    fn retrieval_options(&self) -> SearchOptions {
        let retrieval = &self.config.retrieval;
        let options = SearchOptions::new(retrieval.top_k, retrieval.min_importance);
        match retrieval.min_similarity {
            Some(floor) => options.with_min_similarity(floor),
            None => options,
        }
    }

    /// Rank under the read lock; access metadata is untouched.
    async fn rank(&self, query: &[f32], options: &SearchOptions) -> Result<Vec<ScoredMemory>> {
        self.long_term.read().await.rank(query, options)
    }

    /// Stamp access on the memories actually handed back and log the search.
    async fn record_retrieval(
        &self,
        query_text: &str,
        options: &SearchOptions,
        memories: &mut [ScoredMemory],
    ) {
        if !memories.is_empty() {
            self.long_term
                .write()
                .await
                .mark_accessed(memories, Utc::now());
        }
        self.log_operation(Operation::RetrieveMemories(RetrieveDetails::new(
            query_text,
            options,
            memories.iter().map(|m| m.record.id.clone()).collect(),
        )));
    }

    /// Add under the write lock, making room first when a hard ceiling is
    /// hit and evicting to the soft capacity afterwards.
    ///
    /// Returns the record and whether it survived that eviction. A record
    /// evicted on add gets no `memory_store` event.
    async fn store_memory(
        &self,
        content: String,
        memory_type: MemoryType,
        importance: f32,
        embedding: Vec<f32>,
        promoted: bool,
    ) -> Result<(MemoryRecord, bool)> {
        let max_memories = self.config.long_term.max_memories;
        let (record, evicted) = {
            let mut store = self.long_term.write().await;
            let mut evicted = Vec::new();
            if let Some(ceiling) = self.config.long_term.hard_ceiling {
                if store.len() >= ceiling {
                    evicted = self
                        .retention
                        .evict_to_capacity(&mut store, ceiling.saturating_sub(1));
                }
            }
            let record = store.add(content, memory_type, importance, embedding)?;
            if store.len() > max_memories {
                evicted.extend(self.retention.evict_to_capacity(&mut store, max_memories));
            }
            (record, evicted)
        };

        let retained = !evicted.contains(&record.id);
        if retained {
            info!(
                memory_id = %record.id,
                memory_type = %record.memory_type,
                importance = record.importance,
                promoted,
                "Memory stored"
            );
            self.events.stored(&record);
        } else {
            info!(
                memory_id = %record.id,
                importance = record.importance,
                max_memories,
                promoted,
                "Memory evicted on add, below every retained memory"
            );
        }
        self.log_operation(Operation::AddMemory(AddMemoryDetails::new(&record, promoted)));
        if !evicted.is_empty() {
            self.log_operation(Operation::Evict(EvictDetails {
                max_memories,
                evicted,
            }));
        }
        Ok((record, retained))
    }

    fn log_operation(&self, operation: Operation) {
        let entry = OperationEntry::now(operation);
        self.operations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        self.events.operation(entry);
    }
}
