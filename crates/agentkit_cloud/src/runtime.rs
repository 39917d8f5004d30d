//! Managed agent runtime unit.
//!
//! The runtime pulls its container image from the registry and verifies
//! inbound calls against the identity provider's discovery document, so its
//! props are constructed from both producer outputs.
//!
//! The long-lived memory store carries up to three named extraction
//! strategies. Their sub-identifiers may be unavailable at provisioning time
//! (the provisioning toolchain cannot introspect them yet), so every field is
//! optional and downstream consumers must treat absence as normal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::DeployConfig;
use crate::identity::IdentityOutputs;
use crate::registry::RegistryOutputs;

/// Default retention for memory records, in days.
pub const DEFAULT_MEMORY_EXPIRATION_DAYS: u32 = 90;

/// Named memory extraction strategies supported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryStrategy {
    /// Compresses conversations into concise overviews.
    Summarization,
    /// Distills general facts and concepts.
    SemanticFact,
    /// Captures user preferences and behavior patterns.
    UserPreference,
}

impl MemoryStrategy {
    pub fn all() -> [Self; 3] {
        [Self::Summarization, Self::SemanticFact, Self::UserPreference]
    }

    /// Environment variable carrying this strategy's sub-identifier.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Summarization => "AGENTCORE_SUMMARIZATION_STRATEGY_ID",
            Self::SemanticFact => "AGENTCORE_SEMANTIC_STRATEGY_ID",
            Self::UserPreference => "AGENTCORE_USER_PREFERENCE_STRATEGY_ID",
        }
    }
}

/// Long-lived memory store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Memory store identifier.
    #[serde(rename = "memoryId")]
    pub memory_id: String,
    /// Record retention in days.
    #[serde(rename = "expirationDays")]
    pub expiration_days: u32,
    /// Per-strategy sub-identifiers; absent when the toolchain could not
    /// resolve them at provisioning time.
    #[serde(rename = "strategyIds", default, skip_serializing_if = "HashMap::is_empty")]
    pub strategy_ids: HashMap<MemoryStrategy, Option<String>>,
}

impl MemoryConfig {
    pub fn new(memory_id: impl Into<String>) -> Self {
        let strategy_ids = MemoryStrategy::all()
            .into_iter()
            .map(|s| (s, None))
            .collect();
        Self {
            memory_id: memory_id.into(),
            expiration_days: DEFAULT_MEMORY_EXPIRATION_DAYS,
            strategy_ids,
        }
    }

    pub fn with_strategy_id(mut self, strategy: MemoryStrategy, id: impl Into<String>) -> Self {
        self.strategy_ids.insert(strategy, Some(id.into()));
        self
    }

    /// Sub-identifier for a strategy, when the toolchain resolved one.
    pub fn strategy_id(&self, strategy: MemoryStrategy) -> Option<&str> {
        self.strategy_ids
            .get(&strategy)
            .and_then(|id| id.as_deref())
    }
}

/// Properties for the managed agent runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeProps {
    /// Runtime name.
    #[serde(rename = "runtimeName")]
    pub runtime_name: String,
    /// Container image to execute, pulled from the registry.
    #[serde(rename = "imageUri")]
    pub image_uri: String,
    /// OpenID discovery URL used to verify inbound bearer tokens.
    #[serde(rename = "discoveryUrl")]
    pub discovery_url: String,
    /// Client identifiers accepted by the JWT authorizer.
    #[serde(rename = "allowedClients")]
    pub allowed_clients: Vec<String>,
    /// Optional long-lived memory store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryConfig>,
}

impl RuntimeProps {
    /// Build runtime props from the registry and identity outputs.
    pub fn new(
        config: &DeployConfig,
        registry: &RegistryOutputs,
        identity: &IdentityOutputs,
    ) -> Self {
        Self {
            runtime_name: config.resource_name("runtime"),
            image_uri: registry.image_uri("latest"),
            discovery_url: identity.discovery_url(&config.region),
            allowed_clients: vec![identity.client_id.clone()],
            memory: None,
        }
    }

    pub fn with_memory(mut self, memory: MemoryConfig) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Environment variables injected into the runtime container.
    ///
    /// Only resolved memory identifiers are passed through; absent strategy
    /// sub-identifiers produce no variable at all.
    pub fn environment(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        if let Some(memory) = &self.memory {
            env.insert("AGENTCORE_MEMORY_ID".to_string(), memory.memory_id.clone());
            for strategy in MemoryStrategy::all() {
                if let Some(id) = memory.strategy_id(strategy) {
                    env.insert(strategy.env_var().to_string(), id.to_string());
                }
            }
        }
        env
    }
}

/// Outputs produced by the agent runtime unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeOutputs {
    /// Runtime reference (ARN-like identifier).
    #[serde(rename = "runtimeArn")]
    pub runtime_arn: String,
    /// Image URI the runtime was provisioned with.
    #[serde(rename = "imageUri")]
    pub image_uri: String,
    /// Memory store configuration, when one was provisioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryConfig>,
}
