//! Backend API unit.
//!
//! The API fronts a function that relays authenticated calls to the agent
//! runtime. Its props are built from the identity outputs (token
//! verification) and the runtime outputs (invocation target address).

use serde::{Deserialize, Serialize};

use crate::config::DeployConfig;
use crate::identity::IdentityOutputs;
use crate::runtime::RuntimeOutputs;

/// Derive the HTTPS invocation endpoint for a runtime reference.
///
/// The reference is percent-encoded and embedded in the region-specific URL
/// template. The relay appends `?qualifier=DEFAULT` when calling it.
pub fn invocation_endpoint(runtime_arn: &str, region: &str) -> String {
    format!(
        "https://bedrock-agentcore.{}.amazonaws.com/runtimes/{}/invocations",
        region,
        percent_encode(runtime_arn)
    )
}

/// Percent-encode a runtime reference for use in a URL path segment.
///
/// Matches `encodeURIComponent`: unreserved characters (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`)
/// pass through, everything else becomes `%XX` per UTF-8 byte. In practice the
/// interesting characters in a runtime reference are `:` and `/`.
fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Properties for the backend API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProps {
    /// API name.
    #[serde(rename = "apiName")]
    pub api_name: String,
    /// User pool whose tokens the backend verifies.
    #[serde(rename = "userPoolId")]
    pub user_pool_id: String,
    /// HTTPS endpoint the backend relays invocations to.
    #[serde(rename = "runtimeEndpoint")]
    pub runtime_endpoint: String,
    /// Runtime reference, kept for request signing by the relay.
    #[serde(rename = "runtimeArn")]
    pub runtime_arn: String,
    /// Deployment stage name.
    #[serde(rename = "stageName")]
    pub stage_name: String,
    /// Relay timeout in seconds.
    #[serde(rename = "timeoutSeconds")]
    pub timeout_seconds: u32,
}

impl ApiProps {
    /// Build API props from the identity and runtime outputs.
    pub fn new(
        config: &DeployConfig,
        identity: &IdentityOutputs,
        runtime: &RuntimeOutputs,
    ) -> Self {
        Self {
            api_name: config.resource_name("api"),
            user_pool_id: identity.user_pool_id.clone(),
            runtime_endpoint: invocation_endpoint(&runtime.runtime_arn, &config.region),
            runtime_arn: runtime.runtime_arn.clone(),
            stage_name: "prod".to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Outputs produced by the API unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiOutputs {
    /// Public entry URL (with trailing slash, stage included).
    #[serde(rename = "apiUrl")]
    pub api_url: String,
    /// Full invoke endpoint used by the chat client.
    #[serde(rename = "invokeUrl")]
    pub invoke_url: String,
}

impl ApiOutputs {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        let invoke_url = format!("{}agent/invoke", api_url);
        Self { api_url, invoke_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_endpoint_encodes_arn() {
        let arn = "arn:aws:bedrock-agentcore:us-east-1:123456789012:runtime/agent-rt";
        let endpoint = invocation_endpoint(arn, "us-east-1");

        assert!(endpoint.starts_with("https://bedrock-agentcore.us-east-1.amazonaws.com/runtimes/"));
        assert!(endpoint.ends_with("/invocations"));
        // Colons and slashes in the reference must be escaped.
        assert!(endpoint.contains("arn%3Aaws%3Abedrock-agentcore"));
        assert!(endpoint.contains("runtime%2Fagent-rt"));
        assert!(!endpoint.contains("runtime/agent-rt"));
    }

    #[test]
    fn test_percent_encode_unreserved_passthrough() {
        assert_eq!(percent_encode("Agent_rt-1.0~ok"), "Agent_rt-1.0~ok");
        assert_eq!(percent_encode("a b"), "a%20b");
    }

    #[test]
    fn test_api_outputs_invoke_url() {
        let outputs = ApiOutputs::new("https://abc123.execute-api.us-east-1.amazonaws.com/prod/");
        assert_eq!(
            outputs.invoke_url,
            "https://abc123.execute-api.us-east-1.amazonaws.com/prod/agent/invoke"
        );
    }

    #[test]
    fn test_api_props_from_outputs() {
        let config = DeployConfig::default();
        let identity = IdentityOutputs {
            user_pool_id: "us-east-1_Pool".to_string(),
            client_id: "client-1".to_string(),
            domain: None,
        };
        let runtime = RuntimeOutputs {
            runtime_arn: "arn:aws:bedrock-agentcore:us-east-1:1:runtime/rt".to_string(),
            image_uri: "repo:latest".to_string(),
            memory: None,
        };

        let props = ApiProps::new(&config, &identity, &runtime);
        assert_eq!(props.user_pool_id, "us-east-1_Pool");
        assert!(props.runtime_endpoint.contains("%3A"));
        assert_eq!(props.timeout_seconds, 60);
    }
}
