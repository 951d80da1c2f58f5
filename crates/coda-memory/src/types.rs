//! Core data types for the memory subsystem.
//!
//! **Turns** live in the short-term buffer; **memory records** live in the
//! long-term store and carry an embedding plus retention metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum characters kept in a content preview.
pub const PREVIEW_MAX_CHARS: usize = 100;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// User utterance
    User,
    /// Assistant response
    Assistant,
    /// System prompt; pinned in the short-term buffer
    System,
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::System => write!(f, "system"),
        }
    }
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Opaque turn ID (UUID)
    pub id: String,
    /// Who sent the message
    pub role: TurnRole,
    /// Message text
    pub text: String,
    /// When the turn was recorded
    pub created_at: DateTime<Utc>,
    /// Token count, precomputed by the pipeline
    pub token_count: u32,
}

impl ConversationTurn {
    /// Create a turn with an estimated token count.
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        let text = text.into();
        let token_count = estimate_tokens(&text);
        Self::with_token_count(role, text, token_count)
    }

    /// Create a turn with a token count supplied by the caller's tokenizer.
    pub fn with_token_count(role: TurnRole, text: impl Into<String>, token_count: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            created_at: Utc::now(),
            token_count,
        }
    }

    /// Shorthand for a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    /// Shorthand for an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, text)
    }

    /// Shorthand for a system turn.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(TurnRole::System, text)
    }

    /// Override the creation timestamp (pipeline callbacks carry their own).
    #[must_use]
    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// System turns are pinned: never counted against the cap, never evicted.
    pub fn is_pinned(&self) -> bool {
        self.role == TurnRole::System
    }
}

/// Category of a long-term memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    /// Something true about the user or the world
    Fact,
    /// A stated like or dislike
    Preference,
    /// A chunk of conversation worth keeping
    Conversation,
    /// Assistant persona / personal lore
    Persona,
}

impl MemoryType {
    /// All variants, in display order.
    pub const ALL: [MemoryType; 4] = [
        MemoryType::Fact,
        MemoryType::Preference,
        MemoryType::Conversation,
        MemoryType::Persona,
    ];
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fact => write!(f, "fact"),
            Self::Preference => write!(f, "preference"),
            Self::Conversation => write!(f, "conversation"),
            Self::Persona => write!(f, "persona"),
        }
    }
}

impl std::str::FromStr for MemoryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fact" => Ok(Self::Fact),
            "preference" => Ok(Self::Preference),
            "conversation" => Ok(Self::Conversation),
            "persona" => Ok(Self::Persona),
            other => Err(format!("unknown memory type: {other}")),
        }
    }
}

/// A long-term memory with its embedding and retention metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique memory ID (UUID, never reused)
    pub id: String,
    /// Full memory content
    pub content: String,
    /// Embedding vector; length fixed per store
    pub embedding: Vec<f32>,
    /// Memory category
    pub memory_type: MemoryType,
    /// Retention priority in [0, 1]
    pub importance: f32,
    /// When this memory was created
    pub created_at: DateTime<Utc>,
    /// When this memory was last returned by a search
    pub last_accessed_at: DateTime<Utc>,
    /// How many times this memory was returned by a search
    #[serde(default)]
    pub access_count: u32,
    /// How many times this memory was explicitly reinforced
    #[serde(default)]
    pub reinforcement_count: u32,
    /// When the last decay pass touched this memory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decayed_at: Option<DateTime<Utc>>,
}

impl MemoryRecord {
    /// Point in time from which the next decay pass measures elapsed time.
    pub fn decay_anchor(&self) -> DateTime<Utc> {
        match self.decayed_at {
            Some(decayed) if decayed > self.last_accessed_at => decayed,
            _ => self.last_accessed_at,
        }
    }

    /// Access-triggered plus explicit reinforcements; lengthens the half-life.
    pub fn reinforcements(&self) -> u32 {
        self.access_count.saturating_add(self.reinforcement_count)
    }

    /// Short preview of the content for events and logs.
    pub fn preview(&self) -> String {
        preview(&self.content)
    }
}

/// A memory returned by a search, with its ranking score.
#[derive(Debug, Clone)]
pub struct ScoredMemory {
    /// The memory as of the search
    pub record: MemoryRecord,
    /// Raw cosine similarity to the query
    pub similarity: f32,
    /// Blended similarity/importance score used for ranking
    pub score: f32,
}

/// Approximate token count (~4 characters per token, at least 1).
pub fn estimate_tokens(text: &str) -> u32 {
    let chars = text.chars().count();
    ((chars / 4) as u32).max(1)
}

/// Truncate at a char boundary, appending `...` when shortened.
pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
    out.push_str("...");
    out
}
