//! # agentkit_chat
//!
//! Chat client for the agentkit backend.
//!
//! The backend's managed agent runtime is stateful per session identifier.
//! The client is a faithful relay of that identifier: the first successful
//! response establishes it, every later request carries it, and clearing it
//! asks the backend for a fresh conversation context while the local turn
//! history stays intact.
//!
//! ## Example
//!
//! ```rust,no_run
//! use agentkit_chat::{ChatSession, EnvTokenProvider, HttpAgentClient};
//!
//! # async fn run() -> agentkit_chat::ChatResult<()> {
//! let client = HttpAgentClient::new(
//!     "https://api.example.com/prod",
//!     Box::new(EnvTokenProvider::default()),
//! );
//! let mut session = ChatSession::new(client);
//! session.send_turn("hello").await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod conversation;
pub mod error;
pub mod session;
pub mod types;

pub use auth::{EnvTokenProvider, StaticTokenProvider, TokenProvider};
pub use client::{AgentBackend, HttpAgentClient};
pub use conversation::Conversation;
pub use error::{ChatError, ChatResult};
pub use session::{ChatSession, SessionHandle};
pub use types::{ConversationTurn, ErrorBody, InvokeRequest, InvokeResponse, TurnRole};
