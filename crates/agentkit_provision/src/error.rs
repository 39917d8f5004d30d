//! Error types for provisioning.

use thiserror::Error;

use crate::plan::UnitKind;

/// Result type alias for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Errors that can occur during plan validation or provisioning.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Unit '{unit}' depends on '{dependency}' which is not in the plan")]
    MissingDependency { unit: UnitKind, dependency: UnitKind },

    #[error("Dependency cycle involving units: {0:?}")]
    Cycle(Vec<UnitKind>),

    #[error("Provisioning did not complete; no outputs available")]
    OutputsUnavailable,

    #[error("Cloud error: {0}")]
    Cloud(#[from] agentkit_cloud::CloudError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
