//! Bearer token acquisition.
//!
//! Token retrieval sits behind a trait so the HTTP client can reject an
//! unauthenticated send before any network call is made.

use async_trait::async_trait;

use crate::error::{ChatError, ChatResult};

/// Environment variable read by [`EnvTokenProvider`].
pub const TOKEN_ENV_VAR: &str = "AGENTKIT_BEARER_TOKEN";

/// Supplies the bearer token sent with every invoke request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current bearer token, or `AuthenticationRequired` when none exists.
    async fn bearer_token(&self) -> ChatResult<String>;
}

/// Fixed token, useful for tests and scripted runs.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> ChatResult<String> {
        if self.token.is_empty() {
            return Err(ChatError::AuthenticationRequired);
        }
        Ok(self.token.clone())
    }
}

/// Reads the token from the environment on every call, so a refreshed token
/// is picked up without restarting.
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn bearer_token(&self) -> ChatResult<String> {
        match std::env::var(&self.var) {
            Ok(token) if !token.is_empty() => Ok(token),
            _ => Err(ChatError::AuthenticationRequired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticTokenProvider::new("token-1");
        assert_eq!(provider.bearer_token().await.unwrap(), "token-1");
    }

    #[tokio::test]
    async fn test_empty_static_token_rejected() {
        let provider = StaticTokenProvider::new("");
        assert!(matches!(
            provider.bearer_token().await,
            Err(ChatError::AuthenticationRequired)
        ));
    }

    #[tokio::test]
    async fn test_env_provider_missing_var() {
        let provider = EnvTokenProvider::new("AGENTKIT_TEST_TOKEN_UNSET");
        assert!(matches!(
            provider.bearer_token().await,
            Err(ChatError::AuthenticationRequired)
        ));
    }
}
