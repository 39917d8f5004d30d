//! Plan command - Show the deployment plan.

use anyhow::Result;
use clap::Args;

use agentkit_provision::Plan;

#[derive(Args)]
pub struct PlanArgs {
    /// Print the plan as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: PlanArgs) -> Result<()> {
    let plan = Plan::full();
    plan.validate()?;
    let stages = plan.stages()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stages)?);
        return Ok(());
    }

    println!("📋 Deployment plan ({} units):\n", plan.units.len());
    for (i, stage) in stages.iter().enumerate() {
        println!("Stage {}:", i + 1);
        for unit in stage {
            let deps = unit.depends_on();
            if deps.is_empty() {
                println!("   {} (no dependencies)", unit.as_str());
            } else {
                let names: Vec<_> = deps.iter().map(|d| d.as_str()).collect();
                println!("   {} (after {})", unit.as_str(), names.join(", "));
            }
        }
    }
    println!("\nUnits within a stage can be provisioned concurrently.");

    Ok(())
}
