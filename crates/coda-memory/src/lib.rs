//! Coda Memory - short-term and long-term conversation memory
//!
//! Buffers recent turns, promotes the ones worth keeping into an embedded
//! long-term store, and builds token-budgeted prompt contexts that merge
//! recent turns with the most relevant memories.
//!
//! # Architecture
//!
//! ```text
//! turn ──► MemoryManager ──► ShortTermStore (bounded, system turns pinned)
//!               │
//!        PersistClassifier ──► Embedder ──► LongTermStore
//!               │                               │
//!               │                        RetentionPolicy
//!               │                     (reinforce, decay, evict)
//!               ▼
//!     build_prompt_context ──► PromptContext (turns + memories)
//!
//!  every operation ──► OperationLog + EventBus ──► dashboards
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod context;
pub mod embedding;
pub mod error;
pub mod events;
pub mod long_term;
pub mod maintenance;
pub mod manager;
pub mod persistence;
pub mod retention;
pub mod scorer;
pub mod short_term;
pub mod stats;
pub mod types;

pub use classifier::{AlwaysPersist, Assessment, KeywordClassifier, NeverPersist, PersistClassifier};
pub use config::MemoryConfig;
pub use context::{PromptContext, PromptMessage};
pub use embedding::{Embedder, OllamaEmbedder};
pub use error::{Error, Result};
pub use events::{EventBus, MemoryEvent, OperationEntry, OperationLog, OperationType};
pub use long_term::{LongTermSnapshot, LongTermStore, SearchOptions};
pub use maintenance::{spawn_maintenance, spawn_maintenance_from_config};
pub use manager::{MemoryManager, Promotion, TurnOutcome};
pub use persistence::SessionDir;
pub use retention::{DecayReport, RetentionPolicy};
pub use scorer::ScoringWeights;
pub use short_term::{ContextSlice, ShortTermSnapshot, ShortTermStore};
pub use stats::MemoryStats;
pub use types::{ConversationTurn, MemoryRecord, MemoryType, ScoredMemory, TurnRole};
