//! Dry-run provisioning client.
//!
//! Synthesizes deterministic outputs from the props instead of calling any
//! cloud API, so `agentkit provision --dry-run` exercises the whole
//! dependency-ordered pipeline offline. The same input always produces the
//! same outputs, which keeps the saved outputs file diffable across runs.

use async_trait::async_trait;
use tracing::info;

use agentkit_cloud::{
    ApiOutputs, ApiProps, CloudClient, CloudResult, DistributionOutputs, DistributionProps,
    IdentityOutputs, IdentityProps, RegistryOutputs, RegistryProps, RuntimeOutputs, RuntimeProps,
};

/// Placeholder account used in synthesized identifiers.
const DRY_RUN_ACCOUNT: &str = "000000000000";

/// CloudClient that fabricates outputs without touching any cloud.
pub struct DryRunClient;

#[async_trait]
impl CloudClient for DryRunClient {
    async fn create_registry(&self, props: &RegistryProps) -> CloudResult<RegistryOutputs> {
        info!("dry-run: container registry '{}'", props.repository_name);
        Ok(RegistryOutputs {
            repository_uri: format!(
                "{}.dkr.ecr.local.amazonaws.com/{}",
                DRY_RUN_ACCOUNT, props.repository_name
            ),
            repository_name: props.repository_name.clone(),
        })
    }

    async fn create_identity(&self, props: &IdentityProps) -> CloudResult<IdentityOutputs> {
        info!("dry-run: identity pool '{}'", props.pool_name);
        Ok(IdentityOutputs {
            user_pool_id: format!("local_{}", props.pool_name),
            client_id: format!("{}-client", props.pool_name),
            domain: props.domain_prefix.clone(),
        })
    }

    async fn create_runtime(&self, props: &RuntimeProps) -> CloudResult<RuntimeOutputs> {
        info!("dry-run: agent runtime '{}'", props.runtime_name);
        Ok(RuntimeOutputs {
            runtime_arn: format!(
                "arn:aws:bedrock-agentcore:local:{}:runtime/{}",
                DRY_RUN_ACCOUNT, props.runtime_name
            ),
            image_uri: props.image_uri.clone(),
            memory: props.memory.clone(),
        })
    }

    async fn create_api(&self, props: &ApiProps) -> CloudResult<ApiOutputs> {
        info!("dry-run: backend API '{}'", props.api_name);
        Ok(ApiOutputs::new(format!(
            "https://{}.execute-api.local.amazonaws.com/{}/",
            props.api_name, props.stage_name
        )))
    }

    async fn create_distribution(
        &self,
        props: &DistributionProps,
    ) -> CloudResult<DistributionOutputs> {
        info!("dry-run: distribution '{}'", props.distribution_name);
        let domain = props
            .custom_domain_name
            .clone()
            .unwrap_or_else(|| format!("{}.cloudfront.local", props.distribution_name));
        Ok(DistributionOutputs::new(
            domain,
            format!("{}-site", props.distribution_name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use agentkit_cloud::DeployConfig;

    fn config() -> DeployConfig {
        DeployConfig::default()
            .with_app_name("demo")
            .with_environment("dev")
    }

    #[tokio::test]
    async fn test_synthesized_outputs_are_deterministic() {
        let client = DryRunClient;
        let props = RegistryProps::new(&config());

        let first = client.create_registry(&props).await.unwrap();
        let second = client.create_registry(&props).await.unwrap();

        assert_eq!(first.repository_uri, second.repository_uri);
        assert!(first.repository_uri.contains(&props.repository_name));
    }

    #[tokio::test]
    async fn test_custom_domain_wins_over_synthesized_one() {
        let client = DryRunClient;
        let cfg = config();
        let identity = IdentityOutputs {
            user_pool_id: "local_pool".into(),
            client_id: "client".into(),
            domain: None,
        };
        let api = ApiOutputs::new("https://api.local/prod/");
        let props = DistributionProps::new(&cfg, &identity, &api)
            .with_custom_domain("chat.example.com", "arn:aws:acm:local:cert");

        let outputs = client.create_distribution(&props).await.unwrap();
        assert_eq!(outputs.domain_name, "chat.example.com");
        assert_eq!(outputs.frontend_url, "https://chat.example.com");
    }
}
