//! Promotion classifiers: decide which turns are worth long-term storage.
//!
//! No LLM calls: the shipped [`KeywordClassifier`] scores text with regex
//! patterns for personal information, preferences, facts, instructions and
//! questions.

use crate::types::MemoryType;
use regex::Regex;
use std::sync::LazyLock;

/// Type and importance assigned to promoted content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    /// Memory type to store under
    pub memory_type: MemoryType,
    /// Initial importance in [0, 1]
    pub importance: f32,
}

impl Default for Assessment {
    fn default() -> Self {
        Self {
            memory_type: MemoryType::Conversation,
            importance: 0.5,
        }
    }
}

/// Decides whether a turn's text should be promoted to long-term memory.
pub trait PersistClassifier: Send + Sync {
    /// Whether `text` warrants promotion.
    fn should_persist(&self, text: &str) -> bool;

    /// Type and importance for promoted text.
    fn assess(&self, _text: &str) -> Assessment {
        Assessment::default()
    }
}

// ── Compiled patterns ───────────────────────────────────────────

static RE_PERSONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:my name is|call me|i am|i'm|i live|i work|my (?:age|birthday|address|phone|email|job|wife|husband|partner|kids?|dog|cat))\b",
    )
    .unwrap()
});

static RE_PREFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:prefer|like|love|hate|dislike|enjoy|favou?rite)s?\b").unwrap()
});

static RE_QUESTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?").unwrap());

static RE_INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:please|could you|can you|would you|remember)\b").unwrap()
});

static RE_FACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:is|are|was|were|has|have|had|will be|won't be)\b").unwrap()
});

const BASE_IMPORTANCE: f32 = 0.5;

/// Regex heuristic classifier.
///
/// Importance starts at 0.5 and gains +0.3 for personal information, +0.2
/// for preferences and +0.1 each for facts, instructions and questions,
/// capped at 1.0. Text persists once it reaches `threshold`.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    threshold: f32,
}

impl KeywordClassifier {
    /// Create a classifier promoting text scored at or above `threshold`.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Importance score for `text`.
    pub fn score(&self, text: &str) -> f32 {
        let mut importance = BASE_IMPORTANCE;
        if RE_PERSONAL.is_match(text) {
            importance += 0.3;
        }
        if RE_PREFERENCE.is_match(text) {
            importance += 0.2;
        }
        if RE_FACT.is_match(text) {
            importance += 0.1;
        }
        if RE_INSTRUCTION.is_match(text) {
            importance += 0.1;
        }
        if RE_QUESTION.is_match(text) {
            importance += 0.1;
        }
        importance.min(1.0)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl PersistClassifier for KeywordClassifier {
    fn should_persist(&self, text: &str) -> bool {
        !text.trim().is_empty() && self.score(text) >= self.threshold
    }

    fn assess(&self, text: &str) -> Assessment {
        let memory_type = if RE_PREFERENCE.is_match(text) {
            MemoryType::Preference
        } else if RE_PERSONAL.is_match(text) {
            MemoryType::Fact
        } else {
            MemoryType::Conversation
        };
        Assessment {
            memory_type,
            importance: self.score(text),
        }
    }
}

/// Promotes every turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPersist;

impl PersistClassifier for AlwaysPersist {
    fn should_persist(&self, _text: &str) -> bool {
        true
    }
}

/// Promotes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverPersist;

impl PersistClassifier for NeverPersist {
    fn should_persist(&self, _text: &str) -> bool {
        false
    }
}
