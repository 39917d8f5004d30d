//! Content distribution unit.
//!
//! Fronts the static-asset store with an edge distribution. Its props carry
//! the identity and API outputs so the built assets can be linked to the
//! deployed backend.

use serde::{Deserialize, Serialize};

use crate::api::ApiOutputs;
use crate::config::DeployConfig;
use crate::identity::IdentityOutputs;

/// Properties for the content distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionProps {
    /// Distribution name.
    #[serde(rename = "distributionName")]
    pub distribution_name: String,
    /// Identity outputs injected into the served assets.
    pub identity: IdentityOutputs,
    /// API outputs injected into the served assets.
    pub api: ApiOutputs,
    /// Custom domain name, when one is configured.
    #[serde(rename = "customDomainName", skip_serializing_if = "Option::is_none")]
    pub custom_domain_name: Option<String>,
    /// Certificate reference for the custom domain.
    #[serde(rename = "certificateArn", skip_serializing_if = "Option::is_none")]
    pub certificate_arn: Option<String>,
    /// Object served at the root and for missing paths (SPA routing).
    #[serde(rename = "defaultRootObject")]
    pub default_root_object: String,
}

impl DistributionProps {
    /// Build distribution props from the identity and API outputs.
    pub fn new(config: &DeployConfig, identity: &IdentityOutputs, api: &ApiOutputs) -> Self {
        Self {
            distribution_name: config.resource_name("frontend"),
            identity: identity.clone(),
            api: api.clone(),
            custom_domain_name: None,
            certificate_arn: None,
            default_root_object: "index.html".to_string(),
        }
    }

    pub fn with_custom_domain(
        mut self,
        domain: impl Into<String>,
        certificate_arn: impl Into<String>,
    ) -> Self {
        self.custom_domain_name = Some(domain.into());
        self.certificate_arn = Some(certificate_arn.into());
        self
    }
}

/// Outputs produced by the distribution unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionOutputs {
    /// Edge distribution domain name.
    #[serde(rename = "domainName")]
    pub domain_name: String,
    /// Backing content store name.
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
    /// Public application URL.
    #[serde(rename = "frontendUrl")]
    pub frontend_url: String,
}

impl DistributionOutputs {
    pub fn new(domain_name: impl Into<String>, bucket_name: impl Into<String>) -> Self {
        let domain_name = domain_name.into();
        let frontend_url = format!("https://{}", domain_name);
        Self {
            domain_name,
            bucket_name: bucket_name.into(),
            frontend_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_outputs_url() {
        let outputs = DistributionOutputs::new("d111.cloudfront.net", "content-bucket");
        assert_eq!(outputs.frontend_url, "https://d111.cloudfront.net");
    }

    #[test]
    fn test_distribution_props_custom_domain() {
        let config = DeployConfig::default();
        let identity = IdentityOutputs {
            user_pool_id: "pool".to_string(),
            client_id: "client".to_string(),
            domain: Some("auth.example.com".to_string()),
        };
        let api = ApiOutputs::new("https://api.example.com/prod/");

        let props = DistributionProps::new(&config, &identity, &api)
            .with_custom_domain("chat.example.com", "arn:aws:acm:us-east-1:1:certificate/c");

        assert_eq!(props.custom_domain_name.as_deref(), Some("chat.example.com"));
        assert!(props.certificate_arn.is_some());
        assert_eq!(props.default_root_object, "index.html");
    }
}
