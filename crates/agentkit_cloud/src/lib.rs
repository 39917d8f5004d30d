//! # agentkit_cloud
//!
//! Typed resource definitions for the agentkit deployment.
//!
//! Each provisioning unit (container registry, identity pool, agent runtime,
//! backend API, content distribution) is described by a props struct consumed
//! by the provisioning toolchain and an outputs struct produced by it.
//! Consumer props are constructed from producer outputs, so cross-unit wiring
//! is explicit value-passing rather than ambient lookup.
//!
//! ## Example
//!
//! ```rust,no_run
//! use agentkit_cloud::{DeployConfig, RegistryProps, IdentityProps};
//!
//! let config = DeployConfig::from_env();
//! let registry = RegistryProps::new(&config);
//! let identity = IdentityProps::new(&config);
//! assert_eq!(registry.max_image_count, 10);
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod distribution;
pub mod error;
pub mod identity;
pub mod linker;
pub mod outputs;
pub mod registry;
pub mod runtime;

pub use api::{invocation_endpoint, ApiOutputs, ApiProps};
pub use client::CloudClient;
pub use config::DeployConfig;
pub use distribution::{DistributionOutputs, DistributionProps};
pub use error::{CloudError, CloudResult};
pub use identity::{IdentityOutputs, IdentityProps, PasswordPolicy};
pub use linker::FrontendLinker;
pub use outputs::StackOutputs;
pub use registry::{RegistryOutputs, RegistryProps};
pub use runtime::{MemoryConfig, MemoryStrategy, RuntimeOutputs, RuntimeProps};
