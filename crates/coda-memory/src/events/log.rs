use super::types::{OperationEntry, OperationType};
use std::collections::{BTreeMap, VecDeque};

/// Ring buffer of the most recent operations.
#[derive(Debug, Clone)]
pub struct OperationLog {
    entries: VecDeque<OperationEntry>,
    capacity: usize,
}

impl OperationLog {
    /// Create a log keeping at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, dropping the oldest when full.
    pub fn push(&mut self, entry: OperationEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The most recent `limit` entries, optionally of one type, oldest first.
    pub fn recent(&self, filter: Option<OperationType>, limit: usize) -> Vec<OperationEntry> {
        let mut out: Vec<OperationEntry> = self
            .entries
            .iter()
            .rev()
            .filter(|e| filter.map_or(true, |t| e.operation_type() == t))
            .take(limit)
            .cloned()
            .collect();
        out.reverse();
        out
    }

    /// Retained entries per type.
    pub fn counts_by_type(&self) -> BTreeMap<OperationType, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.operation_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Retained entry count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new(100)
    }
}
