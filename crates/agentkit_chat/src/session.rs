//! Session state machine.
//!
//! Two states: no session, or an active session identifier issued by the
//! backend. A successful turn always overwrites the identifier with the one
//! the backend returned; a failed turn never touches it. Clearing drops the
//! identifier so the next request starts a fresh server-side context while
//! the local turn history stays visible.

use tracing::{debug, warn};

use crate::client::AgentBackend;
use crate::conversation::Conversation;
use crate::error::{ChatError, ChatResult};
use crate::types::{ConversationTurn, InvokeRequest};

/// Server-issued session identifier, absent until the first successful turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionHandle(Option<String>);

impl SessionHandle {
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// Overwrite with the backend's identifier; the backend is authoritative
    /// even when the value is unchanged.
    pub fn set(&mut self, id: impl Into<String>) {
        self.0 = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Conversation driver over an [`AgentBackend`].
pub struct ChatSession<B: AgentBackend> {
    backend: B,
    conversation: Conversation,
    session: SessionHandle,
    busy: bool,
}

impl<B: AgentBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
            session: SessionHandle::default(),
            busy: false,
        }
    }

    /// Send one turn of the conversation.
    ///
    /// Whitespace-only prompts are ignored without any state change. A send
    /// while another is outstanding returns [`ChatError::Busy`]. Backend
    /// failures are recovered locally: the placeholder is replaced by a
    /// visible error turn, the session handle stays untouched, and the call
    /// still returns `Ok`.
    ///
    /// Cancellation-safe: dropping the returned future at the await point
    /// (a caller timeout, a lost `select!` branch) releases the busy flag
    /// and removes the orphaned placeholder, so the session stays usable.
    pub async fn send_turn(&mut self, prompt: &str) -> ChatResult<()> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(());
        }
        if self.busy {
            return Err(ChatError::Busy);
        }

        self.conversation.push(ConversationTurn::user(prompt));
        let placeholder_id = self.conversation.push(ConversationTurn::pending_assistant());

        let request = InvokeRequest {
            prompt: prompt.to_string(),
            session_id: self.session.id().map(str::to_string),
        };

        self.busy = true;
        let mut turn = TurnGuard {
            busy: &mut self.busy,
            conversation: &mut self.conversation,
            placeholder_id,
            settled: false,
        };

        match self.backend.invoke(&request).await {
            Ok(response) => {
                debug!(session_id = %response.session_id, "Turn resolved");
                self.session.set(response.session_id);
                turn.conversation.resolve(&turn.placeholder_id, response.response);
                turn.settled = true;
            }
            Err(e) => {
                warn!("Turn failed: {}", e);
                turn.conversation.discard(&turn.placeholder_id);
                turn.conversation.push(ConversationTurn::error(e.to_string()));
                turn.settled = true;
            }
        }

        Ok(())
    }

    /// Drop the session identifier; prior turns remain visible and the next
    /// send omits `sessionId`.
    pub fn clear_session(&mut self) {
        debug!("Clearing session");
        self.session.clear();
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.id()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        self.conversation.turns()
    }

    pub fn last_turn(&self) -> Option<&ConversationTurn> {
        self.conversation.last()
    }

    /// Underlying backend, useful for diagnostics and test doubles.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Cleanup for one in-flight turn.
///
/// Runs on every exit from `send_turn` past the busy transition, including a
/// drop of the future at the await point: the busy flag is always released,
/// and a placeholder the turn never settled is removed from the transcript.
struct TurnGuard<'a> {
    busy: &'a mut bool,
    conversation: &'a mut Conversation,
    placeholder_id: String,
    settled: bool,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        *self.busy = false;
        if !self.settled {
            self.conversation.discard(&self.placeholder_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvokeResponse;
    use async_trait::async_trait;

    struct EchoBackend;

    #[async_trait]
    impl AgentBackend for EchoBackend {
        async fn invoke(&self, request: &InvokeRequest) -> ChatResult<InvokeResponse> {
            Ok(InvokeResponse {
                response: format!("echo: {}", request.prompt),
                session_id: "s-echo".to_string(),
                user_id: "u1".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_send_and_resolve() {
        let mut session = ChatSession::new(EchoBackend);
        session.send_turn("hello").await.unwrap();

        assert_eq!(session.turns().len(), 2);
        assert_eq!(session.turns()[1].content, "echo: hello");
        assert!(!session.turns()[1].pending);
        assert_eq!(session.session_id(), Some("s-echo"));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_whitespace_prompt_is_noop() {
        let mut session = ChatSession::new(EchoBackend);
        session.send_turn("   \t ").await.unwrap();

        assert!(session.turns().is_empty());
        assert_eq!(session.session_id(), None);
    }

    #[tokio::test]
    async fn test_clear_session_keeps_history() {
        let mut session = ChatSession::new(EchoBackend);
        session.send_turn("hello").await.unwrap();
        session.clear_session();

        assert_eq!(session.session_id(), None);
        assert_eq!(session.turns().len(), 2);
    }
}
