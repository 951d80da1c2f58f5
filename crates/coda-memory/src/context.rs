//! Prompt context assembled from recent turns and retrieved memories.

use crate::types::{ConversationTurn, ScoredMemory, TurnRole};
use serde::Serialize;

/// Header of the system message listing retrieved memories.
pub const MEMORY_HEADER: &str = "Relevant memories from earlier conversations:";

/// Merged, token-budgeted context for one LLM call.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// Recent turns, oldest first
    pub turns: Vec<ConversationTurn>,
    /// Retrieved memories that fit the budget, best first
    pub memories: Vec<ScoredMemory>,
    /// Tokens used by `turns`
    pub turn_tokens: u32,
    /// Tokens used by `memories`
    pub memory_tokens: u32,
    /// The newest turn alone exceeded the budget
    pub overflow: bool,
}

/// A role/content pair ready for a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    /// Message role
    pub role: TurnRole,
    /// Message text
    pub content: String,
}

impl PromptContext {
    /// Total tokens across turns and memories.
    pub fn total_tokens(&self) -> u32 {
        self.turn_tokens.saturating_add(self.memory_tokens)
    }

    /// Render as chat messages.
    ///
    /// Pinned system turns come first, then one system message listing the
    /// memories (omitted when there are none), then the remaining turns in
    /// order.
    pub fn to_messages(&self) -> Vec<PromptMessage> {
        let mut messages: Vec<PromptMessage> = self
            .turns
            .iter()
            .filter(|t| t.is_pinned())
            .map(to_message)
            .collect();

        if !self.memories.is_empty() {
            let mut content = String::from(MEMORY_HEADER);
            for memory in &self.memories {
                content.push_str("\n- ");
                content.push_str(&memory.record.content);
            }
            messages.push(PromptMessage {
                role: TurnRole::System,
                content,
            });
        }

        messages.extend(self.turns.iter().filter(|t| !t.is_pinned()).map(to_message));
        messages
    }
}

fn to_message(turn: &ConversationTurn) -> PromptMessage {
    PromptMessage {
        role: turn.role,
        content: turn.text.clone(),
    }
}
