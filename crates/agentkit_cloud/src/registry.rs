//! Container registry unit.
//!
//! The registry stores the agent runtime image. It has no dependencies and
//! retains only a bounded number of recent images; older artifacts are
//! evicted on each new push.

use serde::{Deserialize, Serialize};

use crate::config::DeployConfig;

/// Default number of most-recent images kept in the registry.
pub const DEFAULT_MAX_IMAGE_COUNT: u32 = 10;

/// Properties for the container registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryProps {
    /// Repository name.
    #[serde(rename = "repositoryName")]
    pub repository_name: String,
    /// Whether pushed images are scanned.
    #[serde(rename = "scanOnPush")]
    pub scan_on_push: bool,
    /// Retention cap: only this many most-recent images are kept.
    #[serde(rename = "maxImageCount")]
    pub max_image_count: u32,
}

impl RegistryProps {
    /// Build registry props from the deployment configuration.
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            repository_name: config.resource_name("agent-runtime"),
            scan_on_push: true,
            max_image_count: DEFAULT_MAX_IMAGE_COUNT,
        }
    }

    pub fn with_max_image_count(mut self, count: u32) -> Self {
        self.max_image_count = count;
        self
    }
}

/// Outputs produced by the registry unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryOutputs {
    /// Pullable repository URI.
    #[serde(rename = "repositoryUri")]
    pub repository_uri: String,
    /// Repository name.
    #[serde(rename = "repositoryName")]
    pub repository_name: String,
}

impl RegistryOutputs {
    /// Image URI for a given tag.
    pub fn image_uri(&self, tag: &str) -> String {
        format!("{}:{}", self.repository_uri, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_props_defaults() {
        let props = RegistryProps::new(&DeployConfig::default());
        assert_eq!(props.max_image_count, 10);
        assert!(props.scan_on_push);
        assert_eq!(props.repository_name, "agentkit-dev-agent-runtime");
    }

    #[test]
    fn test_image_uri() {
        let outputs = RegistryOutputs {
            repository_uri: "123456789012.dkr.ecr.us-east-1.amazonaws.com/agent".to_string(),
            repository_name: "agent".to_string(),
        };
        assert_eq!(
            outputs.image_uri("latest"),
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/agent:latest"
        );
    }
}
