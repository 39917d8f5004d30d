//! Deployment configuration.
//!
//! Region and account resolution follows the toolchain convention: explicit
//! config file first, then environment, then the `us-east-1` default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CloudError, CloudResult};

/// Default region when neither config nor environment specifies one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Top-level deployment configuration shared by every unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Target account identifier, if known at plan time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Target region.
    pub region: String,
    /// Application name, used to derive resource names.
    #[serde(rename = "appName")]
    pub app_name: String,
    /// Deployment environment (dev, prod, ...).
    pub environment: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            account: None,
            region: DEFAULT_REGION.to_string(),
            app_name: "agentkit".to_string(),
            environment: "dev".to_string(),
        }
    }
}

impl DeployConfig {
    /// Build a configuration from environment variables.
    ///
    /// Reads `AGENTKIT_ACCOUNT` and `AGENTKIT_REGION`; unset values fall back
    /// to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(account) = std::env::var("AGENTKIT_ACCOUNT") {
            if !account.is_empty() {
                config.account = Some(account);
            }
        }
        if let Ok(region) = std::env::var("AGENTKIT_REGION") {
            if !region.is_empty() {
                config.region = region;
            }
        }
        config
    }

    /// Load a configuration from a YAML file.
    pub fn from_file(path: &Path) -> CloudResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields resource names are derived from.
    pub fn validate(&self) -> CloudResult<()> {
        if self.region.is_empty() {
            return Err(CloudError::InvalidConfig("region must not be empty".into()));
        }
        if self.app_name.is_empty() {
            return Err(CloudError::InvalidConfig(
                "appName must not be empty".into(),
            ));
        }
        if self.environment.is_empty() {
            return Err(CloudError::InvalidConfig(
                "environment must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Save the configuration to a YAML file.
    pub fn to_file(&self, path: &Path) -> CloudResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    pub fn with_environment(mut self, env: impl Into<String>) -> Self {
        self.environment = env.into();
        self
    }

    /// Derive a resource name scoped to this app and environment.
    pub fn resource_name(&self, suffix: &str) -> String {
        format!("{}-{}-{}", self.app_name, self.environment, suffix)
    }
}
