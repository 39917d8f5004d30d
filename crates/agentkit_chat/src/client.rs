//! HTTP client for the backend invoke endpoint.

use async_trait::async_trait;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::error::{ChatError, ChatResult};
use crate::types::{ErrorBody, InvokeRequest, InvokeResponse};

/// Seam between the session state machine and the backend.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Issue one invoke request and return the parsed response.
    async fn invoke(&self, request: &InvokeRequest) -> ChatResult<InvokeResponse>;
}

/// `reqwest`-backed client for `POST {endpoint}/agent/invoke`.
pub struct HttpAgentClient {
    endpoint: String,
    tokens: Box<dyn TokenProvider>,
    client: reqwest::Client,
}

impl HttpAgentClient {
    pub fn new(endpoint: impl Into<String>, tokens: Box<dyn TokenProvider>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            tokens,
            client: reqwest::Client::new(),
        }
    }

    fn invoke_url(&self) -> String {
        format!("{}/agent/invoke", self.endpoint)
    }
}

/// Resolve the user-visible message for a non-success response.
///
/// The backend's own `message` is surfaced verbatim when the error body
/// parses; otherwise a generic fallback carries the status code.
fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error_body) if !error_body.message.is_empty() => error_body.message,
        _ => format!("HTTP error! status: {}", status),
    }
}

#[async_trait]
impl AgentBackend for HttpAgentClient {
    async fn invoke(&self, request: &InvokeRequest) -> ChatResult<InvokeResponse> {
        // Token first: an unauthenticated send must fail before the network.
        let token = self.tokens.bearer_token().await?;

        debug!(url = %self.invoke_url(), has_session = request.session_id.is_some(), "Invoking agent");

        let response = self
            .client
            .post(self.invoke_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", token))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Http {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        response
            .json::<InvokeResponse>()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    #[test]
    fn test_error_message_surfaces_backend_message() {
        let body = r#"{"message":"overloaded","error":"Error","status":500}"#;
        assert_eq!(error_message(500, body), "overloaded");
    }

    #[test]
    fn test_error_message_fallback_on_unparseable_body() {
        assert_eq!(error_message(502, "<html>bad gateway</html>"), "HTTP error! status: 502");
        assert_eq!(error_message(401, ""), "HTTP error! status: 401");
    }

    #[test]
    fn test_invoke_url_normalizes_trailing_slash() {
        let client = HttpAgentClient::new(
            "https://api.example.com/prod/",
            Box::new(StaticTokenProvider::new("t")),
        );
        assert_eq!(client.invoke_url(), "https://api.example.com/prod/agent/invoke");
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_network() {
        // Endpoint is unroutable; the call must fail on auth, not transport.
        let client = HttpAgentClient::new(
            "http://192.0.2.1",
            Box::new(StaticTokenProvider::new("")),
        );
        let request = InvokeRequest {
            prompt: "hello".to_string(),
            session_id: None,
        };
        assert!(matches!(
            client.invoke(&request).await,
            Err(ChatError::AuthenticationRequired)
        ));
    }
}
