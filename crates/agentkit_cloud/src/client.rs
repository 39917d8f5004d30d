//! Provisioning toolchain seam.
//!
//! The actual cloud calls live behind this trait. The library only depends
//! on the contract: each method accepts typed props and returns the typed
//! outputs later units consume. Transactional guarantees (rollback on
//! partial failure) belong to the implementation, not to this interface.

use async_trait::async_trait;

use crate::api::{ApiOutputs, ApiProps};
use crate::distribution::{DistributionOutputs, DistributionProps};
use crate::error::CloudResult;
use crate::identity::{IdentityOutputs, IdentityProps};
use crate::registry::{RegistryOutputs, RegistryProps};
use crate::runtime::{RuntimeOutputs, RuntimeProps};

/// Interface to the provisioning toolchain.
#[async_trait]
pub trait CloudClient: Send + Sync {
    /// Create the container registry.
    async fn create_registry(&self, props: &RegistryProps) -> CloudResult<RegistryOutputs>;

    /// Create the identity provider pool and client.
    async fn create_identity(&self, props: &IdentityProps) -> CloudResult<IdentityOutputs>;

    /// Create the managed agent runtime.
    async fn create_runtime(&self, props: &RuntimeProps) -> CloudResult<RuntimeOutputs>;

    /// Create the backend API.
    async fn create_api(&self, props: &ApiProps) -> CloudResult<ApiOutputs>;

    /// Create the content distribution.
    async fn create_distribution(&self, props: &DistributionProps)
        -> CloudResult<DistributionOutputs>;
}
