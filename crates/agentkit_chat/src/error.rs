//! Error types for the chat client.

use std::fmt;

/// Chat client errors
#[derive(Debug)]
pub enum ChatError {
    /// No bearer token available; raised before any network call.
    AuthenticationRequired,
    /// The backend returned a non-success status. `message` is the backend's
    /// own message when the error body parsed, otherwise a generic fallback.
    Http { status: u16, message: String },
    /// The request never completed a round trip.
    Network(String),
    /// Success status but the body was unparseable or missing fields.
    MalformedResponse(String),
    /// A send was attempted while another one was outstanding.
    Busy,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthenticationRequired => write!(f, "Authentication required"),
            Self::Http { message, .. } => write!(f, "{}", message),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            Self::Busy => write!(f, "A request is already in flight"),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
