//! Ordered conversation view.
//!
//! Append-only except for the single in-place resolution of a pending
//! placeholder. Placeholders are addressed by their generated id, never by
//! position, so a resolution always targets the turn created for its own
//! call.

use crate::types::ConversationTurn;

/// The client-side sequence of conversation turns.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn and return its id.
    pub fn push(&mut self, turn: ConversationTurn) -> String {
        let id = turn.id.clone();
        self.turns.push(turn);
        id
    }

    /// Resolve the pending turn with the given id in place.
    ///
    /// Returns false when no such pending turn exists.
    pub fn resolve(&mut self, id: &str, content: impl Into<String>) -> bool {
        match self.turns.iter_mut().find(|t| t.id == id && t.pending) {
            Some(turn) => {
                turn.content = content.into();
                turn.pending = false;
                true
            }
            None => false,
        }
    }

    /// Remove the turn with the given id entirely.
    pub fn discard(&mut self, id: &str) -> bool {
        let before = self.turns.len();
        self.turns.retain(|t| t.id != id);
        self.turns.len() != before
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Whether any placeholder is still unresolved.
    pub fn has_pending(&self) -> bool {
        self.turns.iter().any(|t| t.pending)
    }
}
