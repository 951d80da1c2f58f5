use crate::long_term::SearchOptions;
use crate::stats::MemoryStats;
use crate::types::{preview, MemoryRecord, MemoryType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events published by the memory manager.
///
/// Content is carried as a preview only; full records are fetched through
/// `MemoryManager::get`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MemoryEvent {
    /// A record was added to long-term memory
    MemoryStore(MemoryStoreEvent),
    /// A memory operation was logged
    MemoryOperation(OperationEntry),
    /// Stats snapshot
    MemoryStats(MemoryStats),
}

impl MemoryEvent {
    /// Snake-case event name, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MemoryStore(_) => "memory_store",
            Self::MemoryOperation(_) => "memory_operation",
            Self::MemoryStats(_) => "memory_stats",
        }
    }
}

/// Payload of a `memory_store` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStoreEvent {
    /// ID of the new record
    pub memory_id: String,
    /// Record type
    pub memory_type: MemoryType,
    /// Truncated content
    pub content_preview: String,
    /// Importance at creation
    pub importance: f32,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl From<&MemoryRecord> for MemoryStoreEvent {
    fn from(record: &MemoryRecord) -> Self {
        Self {
            memory_id: record.id.clone(),
            memory_type: record.memory_type,
            content_preview: record.preview(),
            importance: record.importance,
            timestamp: record.created_at,
        }
    }
}

/// Kind of a logged operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Long-term add (promotion or explicit)
    AddMemory,
    /// Similarity search
    RetrieveMemories,
    /// Explicit importance set
    UpdateImportance,
    /// Content edit with re-embedding
    UpdateMemory,
    /// Importance reinforcement
    Reinforce,
    /// Explicit removal
    Forget,
    /// Decay pass
    ApplyDecay,
    /// Capacity eviction
    Evict,
}

impl OperationType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddMemory => "add_memory",
            Self::RetrieveMemories => "retrieve_memories",
            Self::UpdateImportance => "update_importance",
            Self::UpdateMemory => "update_memory",
            Self::Reinforce => "reinforce",
            Self::Forget => "forget",
            Self::ApplyDecay => "apply_decay",
            Self::Evict => "evict",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "add_memory" => Ok(Self::AddMemory),
            "retrieve_memories" => Ok(Self::RetrieveMemories),
            "update_importance" => Ok(Self::UpdateImportance),
            "update_memory" => Ok(Self::UpdateMemory),
            "reinforce" => Ok(Self::Reinforce),
            "forget" => Ok(Self::Forget),
            "apply_decay" => Ok(Self::ApplyDecay),
            "evict" => Ok(Self::Evict),
            other => Err(format!("unknown operation type: {other}")),
        }
    }
}

/// One entry of the operation log.
///
/// Serializes as `{timestamp, operation_type, details}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEntry {
    /// When the operation ran
    pub timestamp: DateTime<Utc>,
    /// What ran, with typed details
    #[serde(flatten)]
    pub operation: Operation,
}

impl OperationEntry {
    /// Stamp an operation with the current time.
    pub fn now(operation: Operation) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
        }
    }

    /// Kind of the wrapped operation.
    pub fn operation_type(&self) -> OperationType {
        self.operation.operation_type()
    }
}

/// A memory operation and its details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation_type", content = "details", rename_all = "snake_case")]
pub enum Operation {
    /// See [`AddMemoryDetails`]
    AddMemory(AddMemoryDetails),
    /// See [`RetrieveDetails`]
    RetrieveMemories(RetrieveDetails),
    /// See [`UpdateImportanceDetails`]
    UpdateImportance(UpdateImportanceDetails),
    /// See [`UpdateMemoryDetails`]
    UpdateMemory(UpdateMemoryDetails),
    /// See [`ReinforceDetails`]
    Reinforce(ReinforceDetails),
    /// See [`ForgetDetails`]
    Forget(ForgetDetails),
    /// See [`ApplyDecayDetails`]
    ApplyDecay(ApplyDecayDetails),
    /// See [`EvictDetails`]
    Evict(EvictDetails),
}

impl Operation {
    /// Kind of this operation.
    pub fn operation_type(&self) -> OperationType {
        match self {
            Self::AddMemory(_) => OperationType::AddMemory,
            Self::RetrieveMemories(_) => OperationType::RetrieveMemories,
            Self::UpdateImportance(_) => OperationType::UpdateImportance,
            Self::UpdateMemory(_) => OperationType::UpdateMemory,
            Self::Reinforce(_) => OperationType::Reinforce,
            Self::Forget(_) => OperationType::Forget,
            Self::ApplyDecay(_) => OperationType::ApplyDecay,
            Self::Evict(_) => OperationType::Evict,
        }
    }
}

/// Details of an `add_memory` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMemoryDetails {
    /// New record ID
    pub memory_id: String,
    /// Record type
    pub memory_type: MemoryType,
    /// Truncated content
    pub content_preview: String,
    /// Stored importance
    pub importance: f32,
    /// Whether the record came from turn promotion
    pub promoted: bool,
}

impl AddMemoryDetails {
    pub(crate) fn new(record: &MemoryRecord, promoted: bool) -> Self {
        Self {
            memory_id: record.id.clone(),
            memory_type: record.memory_type,
            content_preview: record.preview(),
            importance: record.importance,
            promoted,
        }
    }
}

/// Details of a `retrieve_memories` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieveDetails {
    /// Truncated query text
    pub query_preview: String,
    /// Requested result count
    pub top_k: usize,
    /// Importance floor applied
    pub min_importance: f32,
    /// Similarity floor applied, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_similarity: Option<f32>,
    /// Type filter applied, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<MemoryType>,
    /// IDs returned, best first
    pub memory_ids: Vec<String>,
}

impl RetrieveDetails {
    pub(crate) fn new(query: &str, options: &SearchOptions, memory_ids: Vec<String>) -> Self {
        Self {
            query_preview: preview(query),
            top_k: options.top_k,
            min_importance: options.min_importance,
            min_similarity: options.min_similarity,
            memory_type: options.memory_type,
            memory_ids,
        }
    }
}

/// Details of an `update_importance` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateImportanceDetails {
    /// Target record
    pub memory_id: String,
    /// Importance before, `None` if the record was not found
    pub old_importance: Option<f32>,
    /// Importance after clamping
    pub new_importance: f32,
}

/// Details of an `update_memory` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemoryDetails {
    /// Target record
    pub memory_id: String,
    /// Truncated new content
    pub content_preview: String,
    /// Whether the record existed
    pub updated: bool,
}

/// Details of a `reinforce` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforceDetails {
    /// Target record
    pub memory_id: String,
    /// Requested strength
    pub strength: f32,
    /// Importance after reinforcement, `None` if the record was not found
    pub new_importance: Option<f32>,
}

/// Details of a `forget` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgetDetails {
    /// Target record
    pub memory_id: String,
    /// Whether a record was actually removed
    pub removed: bool,
}

/// Details of an `apply_decay` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyDecayDetails {
    /// Records whose importance dropped
    pub decayed: usize,
    /// IDs removed below the forget threshold
    pub forgotten: Vec<String>,
}

/// Details of an `evict` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvictDetails {
    /// Capacity enforced
    pub max_memories: usize,
    /// IDs removed
    pub evicted: Vec<String>,
}
