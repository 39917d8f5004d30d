//! Outputs command - Inspect saved stack outputs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use agentkit_cloud::{FrontendLinker, StackOutputs};

#[derive(Args)]
pub struct OutputsArgs {
    /// Workspace directory holding `.agentkit/outputs.json`
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Render the frontend environment file into this directory
    #[arg(long)]
    frontend_dir: Option<PathBuf>,

    /// Print the raw outputs JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: OutputsArgs) -> Result<()> {
    let path = args.workspace.join(".agentkit").join("outputs.json");
    if !path.exists() {
        anyhow::bail!("Outputs file not found: {} (run `agentkit provision` first)", path.display());
    }
    let outputs = StackOutputs::load(&path)
        .with_context(|| format!("Failed to load outputs from {}", path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        println!("📦 Stack outputs ({}):\n", path.display());
        println!("   Registry URI:  {}", outputs.registry.repository_uri);
        println!("   User pool:     {}", outputs.identity.user_pool_id);
        println!("   App client:    {}", outputs.identity.client_id);
        println!("   Runtime ARN:   {}", outputs.runtime.runtime_arn);
        println!("   API URL:       {}", outputs.api.api_url);
        println!("   Invoke URL:    {}", outputs.api.invoke_url);
        println!("   Frontend URL:  {}", outputs.distribution.frontend_url);
    }

    if let Some(dir) = &args.frontend_dir {
        FrontendLinker::new(&outputs).write_env(dir)?;
        println!("\n✅ Frontend env written to {}", dir.display());
    }

    Ok(())
}
