//! Memory subsystem configuration.
//!
//! Every field has a serde default so partial TOML sections deserialize.

use crate::error::{Error, Result};
use crate::types::MemoryType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level memory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Short-term buffer settings
    #[serde(default)]
    pub short_term: ShortTermConfig,
    /// Long-term store settings
    #[serde(default)]
    pub long_term: LongTermConfig,
    /// Retrieval ranking settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Decay and forgetting settings
    #[serde(default)]
    pub retention: RetentionConfig,
    /// Embedding backend settings
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Debug / observability settings
    #[serde(default)]
    pub debug: DebugConfig,
}

impl MemoryConfig {
    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.short_term.max_turns == 0 {
            return Err(Error::invalid_config(
                "short_term.max_turns",
                "must be at least 1",
            ));
        }
        if self.long_term.embedding_dim == 0 {
            return Err(Error::invalid_config(
                "long_term.embedding_dim",
                "must be at least 1",
            ));
        }
        if let Some(ceiling) = self.long_term.hard_ceiling {
            if ceiling < self.long_term.max_memories {
                return Err(Error::invalid_config(
                    "long_term.hard_ceiling",
                    format!(
                        "{ceiling} is below max_memories ({})",
                        self.long_term.max_memories
                    ),
                ));
            }
        }
        check_unit("retrieval.min_importance", self.retrieval.min_importance)?;
        if let Some(floor) = self.retrieval.min_similarity {
            if !(-1.0..=1.0).contains(&floor) {
                return Err(Error::invalid_config(
                    "retrieval.min_similarity",
                    format!("{floor} is outside [-1, 1]"),
                ));
            }
        }
        check_unit("retrieval.similarity_weight", self.retrieval.similarity_weight)?;
        check_unit("retrieval.importance_weight", self.retrieval.importance_weight)?;
        check_unit("retention.forget_threshold", self.retention.forget_threshold)?;
        check_unit(
            "retention.promotion_threshold",
            self.retention.promotion_threshold,
        )?;
        check_half_life("retention.half_life_days", self.retention.half_life_days)?;
        for (field, value) in [
            ("retention.conversation_half_life_days", self.retention.conversation_half_life_days),
            ("retention.fact_half_life_days", self.retention.fact_half_life_days),
            ("retention.preference_half_life_days", self.retention.preference_half_life_days),
            ("retention.persona_half_life_days", self.retention.persona_half_life_days),
        ] {
            if let Some(days) = value {
                check_half_life(field, days)?;
            }
        }
        if !(self.retention.reinforcement_boost >= 0.0 && self.retention.reinforcement_boost.is_finite()) {
            return Err(Error::invalid_config(
                "retention.reinforcement_boost",
                format!("{} must be non-negative", self.retention.reinforcement_boost),
            ));
        }
        if self.debug.operation_log_capacity == 0 {
            return Err(Error::invalid_config(
                "debug.operation_log_capacity",
                "must be at least 1",
            ));
        }
        if self.debug.event_channel_capacity == 0 {
            return Err(Error::invalid_config(
                "debug.event_channel_capacity",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn check_unit(field: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::invalid_config(field, format!("{value} is outside [0, 1]")));
    }
    Ok(())
}

fn check_half_life(field: &str, days: f64) -> Result<()> {
    if !(days > 0.0 && days.is_finite()) {
        return Err(Error::invalid_config(field, format!("{days} must be positive")));
    }
    Ok(())
}

/// Short-term buffer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortTermConfig {
    /// Maximum non-pinned turns kept
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Token budget used when the caller does not pass one
    #[serde(default = "default_token_budget")]
    pub default_token_budget: u32,
}

fn default_max_turns() -> usize {
    20
}

fn default_token_budget() -> u32 {
    800
}

impl Default for ShortTermConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            default_token_budget: default_token_budget(),
        }
    }
}

/// Long-term store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongTermConfig {
    /// Embedding dimension (fixed per store)
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,
    /// Soft capacity enforced by eviction after each add
    #[serde(default = "default_max_memories")]
    pub max_memories: usize,
    /// Hard ceiling; `add` fails once reached
    #[serde(default)]
    pub hard_ceiling: Option<usize>,
}

fn default_embedding_dim() -> usize {
    384 // MiniLM dimension
}

fn default_max_memories() -> usize {
    1000
}

impl Default for LongTermConfig {
    fn default() -> Self {
        Self {
            embedding_dim: default_embedding_dim(),
            max_memories: default_max_memories(),
            hard_ceiling: None,
        }
    }
}

/// Retrieval ranking configuration.
///
/// Blended score is `similarity * (similarity_weight + importance_weight * importance)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Memories retrieved per prompt
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Importance floor for retrieval
    #[serde(default)]
    pub min_importance: f32,
    /// Cosine similarity floor for prompt-context retrieval
    #[serde(default)]
    pub min_similarity: Option<f32>,
    /// Base weight applied to similarity
    #[serde(default = "default_similarity_weight")]
    pub similarity_weight: f32,
    /// Extra weight scaled by importance
    #[serde(default = "default_importance_weight")]
    pub importance_weight: f32,
}

fn default_top_k() -> usize {
    5
}

fn default_similarity_weight() -> f32 {
    0.7
}

fn default_importance_weight() -> f32 {
    0.3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            min_importance: 0.0,
            min_similarity: None,
            similarity_weight: default_similarity_weight(),
            importance_weight: default_importance_weight(),
        }
    }
}

/// Decay, forgetting and promotion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Default importance half-life in days
    #[serde(default = "default_half_life_days")]
    pub half_life_days: f64,
    /// Half-life override for conversation memories
    #[serde(default = "default_conversation_half_life")]
    pub conversation_half_life_days: Option<f64>,
    /// Half-life override for facts
    #[serde(default = "default_fact_half_life")]
    pub fact_half_life_days: Option<f64>,
    /// Half-life override for preferences
    #[serde(default = "default_preference_half_life")]
    pub preference_half_life_days: Option<f64>,
    /// Half-life override for persona memories
    #[serde(default)]
    pub persona_half_life_days: Option<f64>,
    /// Half-life stretch at full reinforcement (0.2 = 20% longer)
    #[serde(default = "default_reinforcement_boost")]
    pub reinforcement_boost: f64,
    /// Reinforcements beyond this count add no further stretch (0 disables)
    #[serde(default = "default_max_reinforcement_count")]
    pub max_reinforcement_count: u32,
    /// Memories decaying below this importance are removed
    #[serde(default = "default_forget_threshold")]
    pub forget_threshold: f32,
    /// Minimum assessed importance for a turn to be promoted
    #[serde(default = "default_promotion_threshold")]
    pub promotion_threshold: f32,
    /// Background maintenance period in seconds (0 disables)
    #[serde(default = "default_maintenance_interval")]
    pub maintenance_interval_secs: u64,
}

fn default_half_life_days() -> f64 {
    30.0
}

fn default_conversation_half_life() -> Option<f64> {
    Some(15.0)
}

fn default_fact_half_life() -> Option<f64> {
    Some(60.0)
}

fn default_preference_half_life() -> Option<f64> {
    Some(90.0)
}

fn default_reinforcement_boost() -> f64 {
    0.2
}

fn default_max_reinforcement_count() -> u32 {
    5
}

fn default_forget_threshold() -> f32 {
    0.05
}

fn default_promotion_threshold() -> f32 {
    0.6
}

fn default_maintenance_interval() -> u64 {
    300
}

impl RetentionConfig {
    /// Half-life in days for a memory type.
    pub fn half_life_for(&self, memory_type: MemoryType) -> f64 {
        let specific = match memory_type {
            MemoryType::Conversation => self.conversation_half_life_days,
            MemoryType::Fact => self.fact_half_life_days,
            MemoryType::Preference => self.preference_half_life_days,
            MemoryType::Persona => self.persona_half_life_days,
        };
        specific.unwrap_or(self.half_life_days)
    }

    /// Half-life in days after `reinforcements` accesses or reinforce calls.
    ///
    /// `half_life * (1 + min(n, max) / max * reinforcement_boost)`
    pub fn reinforced_half_life(&self, memory_type: MemoryType, reinforcements: u32) -> f64 {
        let base = self.half_life_for(memory_type);
        if self.max_reinforcement_count == 0 || reinforcements == 0 {
            return base;
        }
        let capped = reinforcements.min(self.max_reinforcement_count);
        let factor = f64::from(capped) / f64::from(self.max_reinforcement_count);
        base * (1.0 + factor * self.reinforcement_boost)
    }

    /// Maintenance period, or `None` when disabled.
    pub fn maintenance_interval(&self) -> Option<Duration> {
        (self.maintenance_interval_secs > 0)
            .then(|| Duration::from_secs(self.maintenance_interval_secs))
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            half_life_days: default_half_life_days(),
            conversation_half_life_days: default_conversation_half_life(),
            fact_half_life_days: default_fact_half_life(),
            preference_half_life_days: default_preference_half_life(),
            persona_half_life_days: None,
            reinforcement_boost: default_reinforcement_boost(),
            max_reinforcement_count: default_max_reinforcement_count(),
            forget_threshold: default_forget_threshold(),
            promotion_threshold: default_promotion_threshold(),
            maintenance_interval_secs: default_maintenance_interval(),
        }
    }
}

/// Embedding backend configuration (Ollama).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ollama base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Per-call timeout in milliseconds
    #[serde(default = "default_embed_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}

fn default_embedding_model() -> String {
    "all-minilm".into()
}

fn default_embed_timeout_ms() -> u64 {
    5000
}

impl EmbeddingConfig {
    /// Timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_embedding_model(),
            timeout_ms: default_embed_timeout_ms(),
        }
    }
}

/// Debug-panel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Operation log entries kept for live display
    #[serde(default = "default_operation_log_capacity")]
    pub operation_log_capacity: usize,
    /// Broadcast buffer before slow subscribers lag
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

fn default_operation_log_capacity() -> usize {
    100
}

fn default_event_channel_capacity() -> usize {
    256
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            operation_log_capacity: default_operation_log_capacity(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MemoryConfig::default();
        config.validate().unwrap();
        assert_eq!(config.short_term.max_turns, 20);
        assert_eq!(config.long_term.max_memories, 1000);
        assert_eq!(config.debug.operation_log_capacity, 100);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MemoryConfig =
            serde_json::from_str(r#"{"short_term": {"max_turns": 3}}"#).unwrap();
        assert_eq!(config.short_term.max_turns, 3);
        assert_eq!(config.short_term.default_token_budget, 800);
        assert_eq!(config.retrieval.top_k, 5);
    }

    #[test]
    fn test_half_life_overrides() {
        let retention = RetentionConfig::default();
        assert_eq!(retention.half_life_for(MemoryType::Conversation), 15.0);
        assert_eq!(retention.half_life_for(MemoryType::Fact), 60.0);
        assert_eq!(retention.half_life_for(MemoryType::Preference), 90.0);
        assert_eq!(retention.half_life_for(MemoryType::Persona), 30.0);
    }

    #[test]
    fn test_reinforced_half_life() {
        let retention = RetentionConfig::default();
        assert_eq!(retention.reinforced_half_life(MemoryType::Fact, 0), 60.0);
        assert!((retention.reinforced_half_life(MemoryType::Fact, 1) - 62.4).abs() < 1e-9);
        assert!((retention.reinforced_half_life(MemoryType::Fact, 5) - 72.0).abs() < 1e-9);
        // Capped at max_reinforcement_count
        assert_eq!(
            retention.reinforced_half_life(MemoryType::Fact, 50),
            retention.reinforced_half_life(MemoryType::Fact, 5)
        );

        let disabled = RetentionConfig {
            max_reinforcement_count: 0,
            ..RetentionConfig::default()
        };
        assert_eq!(disabled.reinforced_half_life(MemoryType::Fact, 5), 60.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = MemoryConfig::default();
        config.retention.forget_threshold = 1.5;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { field, .. }) if field == "retention.forget_threshold"
        ));

        let mut config = MemoryConfig::default();
        config.retention.fact_half_life_days = Some(0.0);
        assert!(config.validate().is_err());

        let mut config = MemoryConfig::default();
        config.long_term.hard_ceiling = Some(10);
        assert!(config.validate().is_err());

        let mut config = MemoryConfig::default();
        config.retention.reinforcement_boost = -0.1;
        assert!(config.validate().is_err());

        let mut config = MemoryConfig::default();
        config.retrieval.min_similarity = Some(-0.5);
        config.validate().unwrap();
        config.retrieval.min_similarity = Some(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_maintenance_interval_zero_disables() {
        let mut retention = RetentionConfig::default();
        assert_eq!(retention.maintenance_interval(), Some(Duration::from_secs(300)));
        retention.maintenance_interval_secs = 0;
        assert!(retention.maintenance_interval().is_none());
    }
}
