//! # agentkit_provision
//!
//! Dependency-ordered provisioning of the agentkit deployment.
//!
//! Five units (registry, identity, agent runtime, API, distribution) form a
//! directed acyclic graph: each later unit consumes identifiers produced by
//! earlier ones. The [`Plan`] validates the graph and derives execution
//! stages; the [`Provisioner`] runs the stages against a
//! [`agentkit_cloud::CloudClient`], threading typed outputs from producers to
//! consumers and persisting a [`ProvisionLog`] after each unit.
//!
//! A failed unit blocks every transitive dependent; independent subgraphs
//! still run. No retry or rollback happens at this layer.

pub mod error;
pub mod log;
pub mod plan;
pub mod provisioner;

pub use error::{ProvisionError, ProvisionResult};
pub use log::{ProvisionLog, ProvisionState, UnitRecord, UnitState};
pub use plan::{Plan, UnitKind};
pub use provisioner::Provisioner;
