//! Memory statistics, computed on demand from both stores and the
//! operation log.

use crate::events::{OperationLog, OperationType};
use crate::long_term::LongTermStore;
use crate::short_term::ShortTermStore;
use crate::types::MemoryType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stats snapshot in the shape dashboards expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Short-term buffer occupancy
    pub short_term: ShortTermStats,
    /// Long-term store occupancy
    pub long_term: LongTermStats,
    /// Operation log summary
    pub debug: DebugStats,
}

/// Short-term occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTermStats {
    /// Buffered turns, pinned included
    pub turn_count: usize,
    /// Non-pinned capacity
    pub max_turns: usize,
}

/// Long-term occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermStats {
    /// Stored records
    pub memory_count: usize,
    /// Soft capacity
    pub max_memories: usize,
    /// Records per type; every type is present
    pub memory_types: BTreeMap<MemoryType, usize>,
}

/// Operation log summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugStats {
    /// Retained operation entries
    pub operations_count: usize,
    /// Retained entries per type
    pub operations_by_type: BTreeMap<OperationType, usize>,
    /// When this snapshot was computed
    pub last_update: DateTime<Utc>,
}

impl MemoryStats {
    /// Compute a snapshot.
    pub fn collect(
        short_term: &ShortTermStore,
        long_term: &LongTermStore,
        max_memories: usize,
        log: &OperationLog,
    ) -> Self {
        let mut memory_types: BTreeMap<MemoryType, usize> =
            MemoryType::ALL.iter().map(|t| (*t, 0)).collect();
        memory_types.extend(long_term.counts_by_type());

        Self {
            short_term: ShortTermStats {
                turn_count: short_term.len(),
                max_turns: short_term.max_turns(),
            },
            long_term: LongTermStats {
                memory_count: long_term.len(),
                max_memories,
                memory_types,
            },
            debug: DebugStats {
                operations_count: log.len(),
                operations_by_type: log.counts_by_type(),
                last_update: Utc::now(),
            },
        }
    }
}
