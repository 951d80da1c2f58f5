//! ShortTermStore - bounded buffer of recent conversation turns.
//!
//! System turns are pinned: they never count against `max_turns` and are
//! never evicted by `append`. Everything else is dropped oldest-first once
//! the buffer is over capacity.

use crate::error::{Error, Result};
use crate::types::ConversationTurn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};


/// Ordered buffer of recent turns.
#[derive(Debug, Clone)]
pub struct ShortTermStore {
    turns: VecDeque<ConversationTurn>,
    max_turns: usize,
    unpinned: usize,
    session_start: DateTime<Utc>,
}

/// Turns selected for a prompt, in chronological order.
#[derive(Debug, Clone, Default)]
pub struct ContextSlice {
    /// Included turns, oldest first
    pub turns: Vec<ConversationTurn>,
    /// Sum of the included turns' token counts
    pub total_tokens: u32,
    /// Set when the single most recent turn alone exceeded the budget
    pub overflow: bool,
}

/// Serialized form of the buffer, used for session persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTermSnapshot {
    /// When the session started
    pub session_start: DateTime<Utc>,
    /// When this snapshot was taken
    pub exported_at: DateTime<Utc>,
    /// Every buffered turn, oldest first
    pub turns: Vec<ConversationTurn>,
}

impl ShortTermSnapshot {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON; any malformation is a deserialization error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Deserialization(format!("short-term snapshot: {e}")))
    }
}

impl ShortTermStore {
    /// Create an empty buffer holding up to `max_turns` non-pinned turns.
    pub fn new(max_turns: usize) -> Self {
        debug!(max_turns, "Short-term store initialized");
        Self {
            turns: VecDeque::with_capacity(max_turns + 1),
            max_turns,
            unpinned: 0,
            session_start: Utc::now(),
        }
    }

    /// Append a turn at the tail, evicting the oldest non-pinned turn when
    /// the cap is exceeded. Returns the evicted turn, if any.
    pub fn append(&mut self, turn: ConversationTurn) -> Option<ConversationTurn> {
        if !turn.is_pinned() {
            self.unpinned += 1;
        }
        self.turns.push_back(turn);

        if self.unpinned <= self.max_turns {
            return None;
        }
        let pos = self.turns.iter().position(|t| !t.is_pinned())?;
        let evicted = self.turns.remove(pos)?;
        self.unpinned -= 1;
        debug!(turn_id = %evicted.id, "Evicted oldest short-term turn");
        Some(evicted)
    }

    /// Select the most recent turns fitting `token_budget`.
    ///
    /// Walks backward from the newest turn and stops at the first turn that
    /// would overflow the budget. If the newest turn alone is over budget it
    /// is still returned, with `overflow` set.
    pub fn build_context(&self, token_budget: u32) -> ContextSlice {
        let mut selected: Vec<&ConversationTurn> = Vec::new();
        let mut total: u32 = 0;
        let mut overflow = false;

        for turn in self.turns.iter().rev() {
            let next = total.saturating_add(turn.token_count);
            if next > token_budget {
                if selected.is_empty() {
                    selected.push(turn);
                    total = next;
                    overflow = true;
                }
                break;
            }
            selected.push(turn);
            total = next;
        }

        selected.reverse();
        ContextSlice {
            turns: selected.into_iter().cloned().collect(),
            total_tokens: total,
            overflow,
        }
    }

    /// Capture the full ordered buffer.
    pub fn export_snapshot(&self) -> ShortTermSnapshot {
        ShortTermSnapshot {
            session_start: self.session_start,
            exported_at: Utc::now(),
            turns: self.turns.iter().cloned().collect(),
        }
    }

    /// Replace the buffer with a snapshot's contents.
    ///
    /// The snapshot is validated before anything changes; on error the
    /// current buffer is untouched. Returns the number of turns imported.
    pub fn import_snapshot(&mut self, snapshot: ShortTermSnapshot) -> Result<usize> {
        let mut seen = HashSet::with_capacity(snapshot.turns.len());
        for turn in &snapshot.turns {
            if turn.id.is_empty() {
                return Err(Error::Deserialization("turn with empty id".into()));
            }
            if !seen.insert(turn.id.as_str()) {
                return Err(Error::Deserialization(format!(
                    "duplicate turn id: {}",
                    turn.id
                )));
            }
        }

        let mut turns: VecDeque<ConversationTurn> = snapshot.turns.into();
        let mut unpinned = turns.iter().filter(|t| !t.is_pinned()).count();
        if unpinned > self.max_turns {
            warn!(
                unpinned,
                max_turns = self.max_turns,
                "Snapshot exceeds short-term capacity, dropping oldest turns"
            );
            while unpinned > self.max_turns {
                if let Some(pos) = turns.iter().position(|t| !t.is_pinned()) {
                    turns.remove(pos);
                }
                unpinned -= 1;
            }
        }

        self.turns = turns;
        self.unpinned = unpinned;
        self.session_start = snapshot.session_start;
        info!(count = self.turns.len(), "Imported short-term snapshot");
        Ok(self.turns.len())
    }

    /// Drop every turn, pinned ones included, and restart the session clock.
    pub fn clear(&mut self) -> usize {
        let cleared = self.turns.len();
        self.turns.clear();
        self.unpinned = 0;
        self.session_start = Utc::now();
        info!(cleared, "Short-term memory reset");
        cleared
    }

    /// Buffered turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// Number of buffered turns, pinned ones included.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Capacity for non-pinned turns.
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// When the current session started.
    pub fn session_start(&self) -> DateTime<Utc> {
        self.session_start
    }
}
