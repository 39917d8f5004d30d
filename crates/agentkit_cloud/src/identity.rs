//! Identity provider unit.
//!
//! Produces the user pool and client identifiers the runtime and API use for
//! inbound token verification, plus an optional hosted authorization domain.

use serde::{Deserialize, Serialize};

use crate::config::DeployConfig;

/// Password policy for the user pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicy {
    #[serde(rename = "minLength")]
    pub min_length: u32,
    #[serde(rename = "requireLowercase")]
    pub require_lowercase: bool,
    #[serde(rename = "requireUppercase")]
    pub require_uppercase: bool,
    #[serde(rename = "requireDigits")]
    pub require_digits: bool,
    #[serde(rename = "requireSymbols")]
    pub require_symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_lowercase: true,
            require_uppercase: true,
            require_digits: true,
            require_symbols: true,
        }
    }
}

/// Properties for the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProps {
    /// Pool name.
    #[serde(rename = "poolName")]
    pub pool_name: String,
    /// Whether users can register themselves.
    #[serde(rename = "selfSignUp")]
    pub self_sign_up: bool,
    /// Sign in with email address.
    #[serde(rename = "emailSignIn")]
    pub email_sign_in: bool,
    /// Password policy.
    #[serde(rename = "passwordPolicy")]
    pub password_policy: PasswordPolicy,
    /// Prefix for the hosted authorization domain, when one is wanted.
    #[serde(rename = "domainPrefix", skip_serializing_if = "Option::is_none")]
    pub domain_prefix: Option<String>,
    /// OAuth callback URLs for the hosted UI.
    #[serde(rename = "callbackUrls")]
    pub callback_urls: Vec<String>,
}

impl IdentityProps {
    /// Build identity props from the deployment configuration.
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            pool_name: config.resource_name("users"),
            self_sign_up: false,
            email_sign_in: true,
            password_policy: PasswordPolicy::default(),
            domain_prefix: Some(config.resource_name("auth")),
            callback_urls: vec!["http://localhost:5173".to_string()],
        }
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_urls.push(url.into());
        self
    }
}

/// Outputs produced by the identity unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityOutputs {
    /// User pool identifier.
    #[serde(rename = "userPoolId")]
    pub user_pool_id: String,
    /// App client identifier.
    #[serde(rename = "clientId")]
    pub client_id: String,
    /// Hosted authorization domain, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl IdentityOutputs {
    /// OpenID discovery document URL for inbound token verification.
    pub fn discovery_url(&self, region: &str) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}/.well-known/openid-configuration",
            region, self.user_pool_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_props_defaults() {
        let props = IdentityProps::new(&DeployConfig::default());
        assert!(!props.self_sign_up);
        assert!(props.email_sign_in);
        assert_eq!(props.password_policy.min_length, 8);
        assert_eq!(props.domain_prefix.as_deref(), Some("agentkit-dev-auth"));
    }

    #[test]
    fn test_discovery_url() {
        let outputs = IdentityOutputs {
            user_pool_id: "us-east-1_AbCdEf".to_string(),
            client_id: "client-1".to_string(),
            domain: None,
        };
        assert_eq!(
            outputs.discovery_url("us-east-1"),
            "https://cognito-idp.us-east-1.amazonaws.com/us-east-1_AbCdEf/.well-known/openid-configuration"
        );
    }
}
