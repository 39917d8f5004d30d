//! Core types for the chat client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Turn role in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One user prompt or one assistant response in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Unique turn ID (UUID), used to resolve pending placeholders.
    pub id: String,
    /// Who produced the turn
    pub role: TurnRole,
    /// Turn content; empty while pending
    pub content: String,
    /// When the turn was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// True while an assistant reply is outstanding
    pub pending: bool,
}

impl ConversationTurn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: TurnRole::User,
            content: content.into(),
            created_at: Utc::now(),
            pending: false,
        }
    }

    /// Create a pending assistant placeholder
    pub fn pending_assistant() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: TurnRole::Assistant,
            content: String::new(),
            created_at: Utc::now(),
            pending: true,
        }
    }

    /// Create a synthetic assistant turn carrying an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: TurnRole::Assistant,
            content: format!("Error: {}", message.into()),
            created_at: Utc::now(),
            pending: false,
        }
    }
}

/// Request body for `POST /agent/invoke`.
///
/// `sessionId` is omitted entirely, not sent as null, when no session has
/// been established or the user cleared it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvokeRequest {
    pub prompt: String,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Success body from `POST /agent/invoke`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub response: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Error body returned by the backend on non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
    pub status: u16,
}
