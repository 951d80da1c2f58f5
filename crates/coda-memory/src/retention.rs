//! RetentionPolicy - reinforcement, time decay and capacity eviction.
//!
//! Decay is exponential with a per-type half-life:
//!
//! ```text
//! importance' = importance * 0.5 ^ (elapsed_days / half_life_days)
//! ```
//!
//! `elapsed_days` is measured from the record's decay anchor, the later of
//! its last access and the previous decay pass, so repeated passes never
//! count the same interval twice. Access, not creation, drives survival.
//! Every access or explicit reinforcement also stretches the half-life, up
//! to `reinforcement_boost` at `max_reinforcement_count` reinforcements.

use crate::config::RetentionConfig;
use crate::long_term::{clamp_unit, LongTermStore};
use crate::types::MemoryType;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Outcome of a decay pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecayReport {
    /// Records whose importance was lowered
    pub decayed: usize,
    /// IDs removed for falling below the forget threshold
    pub forgotten: Vec<String>,
}

/// Importance bookkeeping for a [`LongTermStore`].
#[derive(Debug, Clone, Default)]
pub struct RetentionPolicy {
    config: RetentionConfig,
}

impl RetentionPolicy {
    /// Create a policy from configuration.
    pub fn new(config: RetentionConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &RetentionConfig {
        &self.config
    }

    /// Multiplier applied to importance after `elapsed_days` without access.
    pub fn decay_factor(
        &self,
        memory_type: MemoryType,
        elapsed_days: f64,
        reinforcements: u32,
    ) -> f32 {
        if elapsed_days <= 0.0 {
            return 1.0;
        }
        let half_life = self
            .config
            .reinforced_half_life(memory_type, reinforcements);
        0.5f64.powf(elapsed_days / half_life) as f32
    }

    /// Raise a memory's importance by `strength`, capped at 1.0.
    ///
    /// Returns the new importance, or `None` for an unknown ID.
    pub fn reinforce(&self, store: &mut LongTermStore, id: &str, strength: f32) -> Option<f32> {
        let record = store.get_mut(id)?;
        let old = record.importance;
        record.importance = clamp_unit(old + strength);
        record.reinforcement_count = record.reinforcement_count.saturating_add(1);
        debug!(memory_id = id, old, new = record.importance, "Reinforced memory");
        Some(record.importance)
    }

    /// Decay every record to `now` and drop the ones below the forget threshold.
    ///
    /// Importance never increases here. A no-op on an empty store.
    pub fn apply_decay(&self, store: &mut LongTermStore, now: DateTime<Utc>) -> DecayReport {
        let threshold = self.config.forget_threshold;
        let mut report = DecayReport::default();

        for record in store.records_mut() {
            let anchor = record.decay_anchor();
            if now > anchor {
                let elapsed_days = (now - anchor).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY;
                let factor =
                    self.decay_factor(record.memory_type, elapsed_days, record.reinforcements());
                let decayed = record.importance * factor;
                if decayed < record.importance {
                    record.importance = decayed;
                    report.decayed += 1;
                }
                record.decayed_at = Some(now);
            }
            if record.importance < threshold {
                report.forgotten.push(record.id.clone());
            }
        }

        for id in &report.forgotten {
            store.remove(id);
        }

        if report.decayed > 0 || !report.forgotten.is_empty() {
            info!(
                decayed = report.decayed,
                forgotten = report.forgotten.len(),
                remaining = store.len(),
                "Applied memory decay"
            );
        }
        report
    }

    /// Evict lowest-importance records until at most `max_memories` remain.
    ///
    /// Ties go to the record accessed longest ago. Returns the evicted IDs.
    pub fn evict_to_capacity(&self, store: &mut LongTermStore, max_memories: usize) -> Vec<String> {
        let excess = store.len().saturating_sub(max_memories);
        if excess == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<(String, f32, DateTime<Utc>)> = store
            .records()
            .map(|r| (r.id.clone(), r.importance, r.last_accessed_at))
            .collect();
        candidates.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.2.cmp(&b.2))
                .then_with(|| a.0.cmp(&b.0))
        });

        let evicted: Vec<String> = candidates
            .into_iter()
            .take(excess)
            .map(|(id, _, _)| id)
            .collect();
        for id in &evicted {
            store.remove(id);
        }

        info!(
            evicted = evicted.len(),
            max_memories,
            "Evicted memories over capacity"
        );
        evicted
    }
}
