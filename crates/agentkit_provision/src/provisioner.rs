//! Stage-ordered provisioner.
//!
//! Executes the full plan against a [`CloudClient`], threading each unit's
//! typed outputs into the props constructors of its dependents. The log is
//! persisted after every unit transition.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{error, info};

use agentkit_cloud::{
    ApiOutputs, ApiProps, CloudClient, CloudResult, DeployConfig, DistributionOutputs,
    DistributionProps, IdentityOutputs, IdentityProps, MemoryConfig, RegistryOutputs,
    RegistryProps, RuntimeOutputs, RuntimeProps, StackOutputs,
};

use crate::error::ProvisionResult;
use crate::log::{ProvisionLog, ProvisionState, UnitState};
use crate::plan::{Plan, UnitKind};

/// Runs a deployment plan against the provisioning toolchain.
pub struct Provisioner<C: CloudClient> {
    client: C,
    config: DeployConfig,
    workspace: PathBuf,
    memory: Option<MemoryConfig>,
}

impl<C: CloudClient> Provisioner<C> {
    pub fn new(client: C, config: DeployConfig, workspace: impl Into<PathBuf>) -> Self {
        Self {
            client,
            config,
            workspace: workspace.into(),
            memory: None,
        }
    }

    /// Attach a long-lived memory store to the agent runtime.
    pub fn with_memory(mut self, memory: MemoryConfig) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Provision the full deployment.
    ///
    /// Returns the run log; `log.outputs` is populated only when every unit
    /// completed. A failed unit blocks its transitive dependents but not
    /// independent units, and never triggers a rollback here.
    pub async fn provision(&self) -> ProvisionResult<ProvisionLog> {
        let plan = Plan::full();
        plan.validate()?;

        let mut log = ProvisionLog::new(&plan.units);
        log.state = ProvisionState::Running;
        log.started_at = Some(Utc::now());
        log.save(&self.workspace)?;

        info!(execution_id = %log.execution_id, "Starting provisioning run");

        // Stage 1: registry and identity have no dependency edge between
        // them and run concurrently.
        self.mark_running(&mut log, UnitKind::Registry)?;
        self.mark_running(&mut log, UnitKind::Identity)?;

        let registry_props = RegistryProps::new(&self.config);
        let identity_props = IdentityProps::new(&self.config);
        let (registry_result, identity_result) = tokio::join!(
            self.client.create_registry(&registry_props),
            self.client.create_identity(&identity_props),
        );

        let registry = self.record(&mut log, &plan, UnitKind::Registry, registry_result)?;
        let identity = self.record(&mut log, &plan, UnitKind::Identity, identity_result)?;

        // Stage 2: agent runtime.
        let runtime = match (&registry, &identity) {
            (Some(registry), Some(identity)) => {
                self.mark_running(&mut log, UnitKind::AgentRuntime)?;
                let mut props = RuntimeProps::new(&self.config, registry, identity);
                if let Some(memory) = &self.memory {
                    props = props.with_memory(memory.clone());
                }
                let result = self.client.create_runtime(&props).await;
                self.record(&mut log, &plan, UnitKind::AgentRuntime, result)?
            }
            _ => None,
        };

        // Stage 3: backend API.
        let api = match (&identity, &runtime) {
            (Some(identity), Some(runtime)) => {
                self.mark_running(&mut log, UnitKind::Api)?;
                let props = ApiProps::new(&self.config, identity, runtime);
                let result = self.client.create_api(&props).await;
                self.record(&mut log, &plan, UnitKind::Api, result)?
            }
            _ => None,
        };

        // Stage 4: content distribution.
        let distribution = match (&identity, &api) {
            (Some(identity), Some(api)) => {
                self.mark_running(&mut log, UnitKind::Distribution)?;
                let props = DistributionProps::new(&self.config, identity, api);
                let result = self.client.create_distribution(&props).await;
                self.record(&mut log, &plan, UnitKind::Distribution, result)?
            }
            _ => None,
        };

        log.completed_at = Some(Utc::now());
        match (registry, identity, runtime, api, distribution) {
            (Some(registry), Some(identity), Some(runtime), Some(api), Some(distribution)) => {
                log.state = ProvisionState::Completed;
                log.outputs = Some(StackOutputs {
                    registry,
                    identity,
                    runtime,
                    api,
                    distribution,
                });
                info!(execution_id = %log.execution_id, "Provisioning completed");
            }
            _ => {
                log.state = ProvisionState::Failed;
                error!(
                    execution_id = %log.execution_id,
                    failed = ?log.failed_units(),
                    "Provisioning failed"
                );
            }
        }
        log.save(&self.workspace)?;

        Ok(log)
    }

    fn mark_running(&self, log: &mut ProvisionLog, unit: UnitKind) -> ProvisionResult<()> {
        info!("Provisioning unit: {}", unit);
        let record = log.record_mut(unit);
        record.state = UnitState::Running;
        record.started_at = Some(Utc::now());
        log.save(&self.workspace)
    }

    /// Record a unit result, blocking transitive dependents on failure.
    fn record<T>(
        &self,
        log: &mut ProvisionLog,
        plan: &Plan,
        unit: UnitKind,
        result: CloudResult<T>,
    ) -> ProvisionResult<Option<T>> {
        let outcome = match result {
            Ok(outputs) => {
                let record = log.record_mut(unit);
                record.state = UnitState::Completed;
                record.completed_at = Some(Utc::now());
                info!("Unit '{}' completed", unit);
                Some(outputs)
            }
            Err(e) => {
                let message = e.to_string();
                error!("Unit '{}' failed: {}", unit, message);
                let record = log.record_mut(unit);
                record.state = UnitState::Failed;
                record.message = Some(message.clone());
                record.completed_at = Some(Utc::now());
                if log.error.is_none() {
                    log.error = Some(format!("{}: {}", unit, message));
                }
                for dependent in plan.dependents_of(unit) {
                    let record = log.record_mut(dependent);
                    if record.state == UnitState::Pending {
                        record.state = UnitState::Blocked;
                        info!("Unit '{}' blocked by failure of '{}'", dependent, unit);
                    }
                }
                None
            }
        };
        log.save(&self.workspace)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentkit_cloud::CloudError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Test client that records call order and fails configured units.
    struct ScriptedClient {
        fail: Vec<UnitKind>,
        calls: Mutex<Vec<UnitKind>>,
    }

    impl ScriptedClient {
        fn ok() -> Self {
            Self::failing(&[])
        }

        fn failing(units: &[UnitKind]) -> Self {
            Self {
                fail: units.to_vec(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn check(&self, unit: UnitKind) -> CloudResult<()> {
            self.calls.lock().unwrap().push(unit);
            if self.fail.contains(&unit) {
                return Err(CloudError::CreationFailed {
                    resource: unit.as_str().to_string(),
                    message: "simulated".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CloudClient for ScriptedClient {
        async fn create_registry(&self, props: &RegistryProps) -> CloudResult<RegistryOutputs> {
            self.check(UnitKind::Registry)?;
            Ok(RegistryOutputs {
                repository_uri: format!("registry.example.com/{}", props.repository_name),
                repository_name: props.repository_name.clone(),
            })
        }

        async fn create_identity(&self, _props: &IdentityProps) -> CloudResult<IdentityOutputs> {
            self.check(UnitKind::Identity)?;
            Ok(IdentityOutputs {
                user_pool_id: "us-east-1_Pool".to_string(),
                client_id: "client-1".to_string(),
                domain: None,
            })
        }

        async fn create_runtime(&self, props: &RuntimeProps) -> CloudResult<RuntimeOutputs> {
            self.check(UnitKind::AgentRuntime)?;
            Ok(RuntimeOutputs {
                runtime_arn: format!(
                    "arn:aws:bedrock-agentcore:us-east-1:1:runtime/{}",
                    props.runtime_name
                ),
                image_uri: props.image_uri.clone(),
                memory: props.memory.clone(),
            })
        }

        async fn create_api(&self, _props: &ApiProps) -> CloudResult<ApiOutputs> {
            self.check(UnitKind::Api)?;
            Ok(ApiOutputs::new("https://api.example.com/prod/"))
        }

        async fn create_distribution(
            &self,
            _props: &DistributionProps,
        ) -> CloudResult<DistributionOutputs> {
            self.check(UnitKind::Distribution)?;
            Ok(DistributionOutputs::new("d111.cloudfront.net", "content"))
        }
    }

    #[tokio::test]
    async fn test_full_run_completes() {
        let dir = tempdir().unwrap();
        let provisioner =
            Provisioner::new(ScriptedClient::ok(), DeployConfig::default(), dir.path());

        let log = provisioner.provision().await.unwrap();

        assert_eq!(log.state, ProvisionState::Completed);
        let outputs = log.require_outputs().unwrap();
        // Outputs are threaded, not re-derived: the runtime image comes from
        // the registry the run created.
        assert!(outputs
            .runtime
            .image_uri
            .starts_with(&outputs.registry.repository_uri));
        assert!(outputs.api.invoke_url.ends_with("agent/invoke"));
    }

    #[tokio::test]
    async fn test_registry_failure_blocks_dependents_not_identity() {
        let dir = tempdir().unwrap();
        let client = ScriptedClient::failing(&[UnitKind::Registry]);
        let provisioner = Provisioner::new(client, DeployConfig::default(), dir.path());

        let log = provisioner.provision().await.unwrap();

        assert_eq!(log.state, ProvisionState::Failed);
        assert_eq!(log.unit_state(UnitKind::Registry), Some(UnitState::Failed));
        assert_eq!(log.unit_state(UnitKind::Identity), Some(UnitState::Completed));
        assert_eq!(log.unit_state(UnitKind::AgentRuntime), Some(UnitState::Blocked));
        assert_eq!(log.unit_state(UnitKind::Api), Some(UnitState::Blocked));
        assert_eq!(log.unit_state(UnitKind::Distribution), Some(UnitState::Blocked));
        assert!(log.outputs.is_none());
    }

    #[tokio::test]
    async fn test_api_failure_blocks_only_distribution() {
        let dir = tempdir().unwrap();
        let client = ScriptedClient::failing(&[UnitKind::Api]);
        let provisioner = Provisioner::new(client, DeployConfig::default(), dir.path());

        let log = provisioner.provision().await.unwrap();

        assert_eq!(log.unit_state(UnitKind::Registry), Some(UnitState::Completed));
        assert_eq!(log.unit_state(UnitKind::AgentRuntime), Some(UnitState::Completed));
        assert_eq!(log.unit_state(UnitKind::Api), Some(UnitState::Failed));
        assert_eq!(log.unit_state(UnitKind::Distribution), Some(UnitState::Blocked));
        assert!(log.error.as_deref().unwrap().starts_with("api:"));
    }

    #[tokio::test]
    async fn test_units_run_in_dependency_order() {
        let dir = tempdir().unwrap();
        let client = ScriptedClient::ok();
        let provisioner = Provisioner::new(client, DeployConfig::default(), dir.path());

        provisioner.provision().await.unwrap();

        let calls = provisioner.client.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 5);
        let position =
            |u: UnitKind| calls.iter().position(|c| *c == u).expect("unit not called");
        assert!(position(UnitKind::Registry) < position(UnitKind::AgentRuntime));
        assert!(position(UnitKind::Identity) < position(UnitKind::AgentRuntime));
        assert!(position(UnitKind::AgentRuntime) < position(UnitKind::Api));
        assert!(position(UnitKind::Api) < position(UnitKind::Distribution));
    }

    #[tokio::test]
    async fn test_log_persisted_after_failure() {
        let dir = tempdir().unwrap();
        let client = ScriptedClient::failing(&[UnitKind::AgentRuntime]);
        let provisioner = Provisioner::new(client, DeployConfig::default(), dir.path());

        let log = provisioner.provision().await.unwrap();

        let loaded = ProvisionLog::load(&log.log_path(dir.path())).unwrap();
        assert_eq!(loaded.state, ProvisionState::Failed);
        assert_eq!(loaded.failed_units(), vec![UnitKind::AgentRuntime]);
    }
}
