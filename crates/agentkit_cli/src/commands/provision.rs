//! Provision command - Run the dependency-ordered deployment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use agentkit_cloud::{DeployConfig, FrontendLinker, MemoryConfig, MemoryStrategy};
use agentkit_provision::{ProvisionState, Provisioner, UnitState};

use crate::dry_run::DryRunClient;

#[derive(Args)]
pub struct ProvisionArgs {
    /// Path to a YAML deployment configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Workspace directory for logs and saved outputs
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Attach a conversation memory with this identifier to the runtime
    #[arg(long)]
    memory_id: Option<String>,

    /// Write the frontend environment file into this directory after a
    /// successful run
    #[arg(long)]
    frontend_dir: Option<PathBuf>,

    /// Synthesize outputs locally instead of calling any cloud API
    #[arg(long)]
    dry_run: bool,
}

pub async fn execute(args: ProvisionArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => DeployConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DeployConfig::from_env(),
    };

    info!(
        "Provisioning '{}' ({}) in {}",
        config.app_name, config.environment, config.region
    );

    if !args.dry_run {
        anyhow::bail!(
            "provisioning against a live cloud is not wired up yet; pass --dry-run to \
             synthesize outputs locally"
        );
    }

    let mut provisioner = Provisioner::new(DryRunClient, config, &args.workspace);
    if let Some(memory_id) = &args.memory_id {
        let memory = MemoryConfig::new(memory_id)
            .with_strategy_id(MemoryStrategy::Summarization, format!("{memory_id}-summary"))
            .with_strategy_id(MemoryStrategy::SemanticFact, format!("{memory_id}-semantic"))
            .with_strategy_id(
                MemoryStrategy::UserPreference,
                format!("{memory_id}-preference"),
            );
        provisioner = provisioner.with_memory(memory);
    }

    let log = provisioner.provision().await?;

    println!("🏗️  Provisioning run {}:\n", log.execution_id);
    for record in &log.units {
        let mark = match record.state {
            UnitState::Completed => "✅",
            UnitState::Failed => "❌",
            UnitState::Blocked => "⛔",
            UnitState::Pending | UnitState::Running => "⏳",
        };
        match &record.message {
            Some(message) => println!("   {} {} - {}", mark, record.unit, message),
            None => println!("   {} {}", mark, record.unit),
        }
    }
    println!();

    if log.state != ProvisionState::Completed {
        let failed: Vec<_> = log.failed_units().iter().map(|u| u.to_string()).collect();
        anyhow::bail!("provisioning failed for unit(s): {}", failed.join(", "));
    }

    let outputs = log.require_outputs()?;
    let outputs_path = args.workspace.join(".agentkit").join("outputs.json");
    outputs.save(&outputs_path)?;
    println!("✅ Stack outputs saved to {}", outputs_path.display());
    println!("   Invoke URL:   {}", outputs.api.invoke_url);
    println!("   Frontend URL: {}", outputs.distribution.frontend_url);

    if let Some(dir) = &args.frontend_dir {
        FrontendLinker::new(outputs).write_env(dir)?;
        println!("✅ Frontend env written to {}", dir.display());
    }

    Ok(())
}
