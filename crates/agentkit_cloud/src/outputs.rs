//! Aggregate stack outputs.
//!
//! The configuration contract consumed across units and by external tools:
//! registry URI, pool and client identifiers, runtime reference, API entry
//! URL, distribution domain.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::ApiOutputs;
use crate::distribution::DistributionOutputs;
use crate::error::CloudResult;
use crate::identity::IdentityOutputs;
use crate::registry::RegistryOutputs;
use crate::runtime::RuntimeOutputs;

/// Outputs from a complete deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackOutputs {
    pub registry: RegistryOutputs,
    pub identity: IdentityOutputs,
    pub runtime: RuntimeOutputs,
    pub api: ApiOutputs,
    pub distribution: DistributionOutputs,
}

impl StackOutputs {
    /// Save outputs as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> CloudResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load outputs from a JSON file.
    pub fn load(path: &Path) -> CloudResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let outputs: Self = serde_json::from_str(&content)?;
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MemoryConfig;
    use tempfile::tempdir;

    pub(crate) fn sample_outputs() -> StackOutputs {
        StackOutputs {
            registry: RegistryOutputs {
                repository_uri: "123.dkr.ecr.us-east-1.amazonaws.com/agent".to_string(),
                repository_name: "agent".to_string(),
            },
            identity: IdentityOutputs {
                user_pool_id: "us-east-1_Pool".to_string(),
                client_id: "client-1".to_string(),
                domain: Some("agentkit-dev-auth".to_string()),
            },
            runtime: RuntimeOutputs {
                runtime_arn: "arn:aws:bedrock-agentcore:us-east-1:1:runtime/rt".to_string(),
                image_uri: "123.dkr.ecr.us-east-1.amazonaws.com/agent:latest".to_string(),
                memory: Some(MemoryConfig::new("mem-1")),
            },
            api: ApiOutputs::new("https://abc.execute-api.us-east-1.amazonaws.com/prod/"),
            distribution: DistributionOutputs::new("d111.cloudfront.net", "content"),
        }
    }

    #[test]
    fn test_outputs_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".agentkit").join("outputs.json");

        let outputs = sample_outputs();
        outputs.save(&path).unwrap();

        let loaded = StackOutputs::load(&path).unwrap();
        assert_eq!(loaded.identity.user_pool_id, "us-east-1_Pool");
        assert_eq!(loaded.api.invoke_url, outputs.api.invoke_url);
        assert!(loaded.runtime.memory.is_some());
    }
}
