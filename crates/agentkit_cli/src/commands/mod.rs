//! CLI command definitions.
//!
//! This module defines the command structure for the agentkit CLI.
//! Each subcommand maps to one stage of the deploy-and-chat workflow.

use clap::{Parser, Subcommand};

pub mod chat;
pub mod outputs;
pub mod plan;
pub mod provision;

/// agentkit - cloud provisioning and chat for a conversational AI agent
#[derive(Parser)]
#[command(name = "agentkit")]
#[command(version, about = "agentkit - provision and talk to a conversational AI agent")]
#[command(long_about = r#"
agentkit provisions the cloud infrastructure for a conversational AI agent
(container registry, identity, agent runtime, HTTP API, frontend distribution)
and ships a terminal chat client that talks to the deployed agent.

WORKFLOWS:
  plan       → Show the deployment plan and its dependency stages
  provision  → Provision all infrastructure units in dependency order
  outputs    → Show saved stack outputs, optionally render the frontend env file
  chat       → Start an interactive chat session against the deployed agent

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Provisioning failure
  4 - Chat or authentication failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the deployment plan and its dependency stages
    Plan(plan::PlanArgs),

    /// Provision the infrastructure units in dependency order
    Provision(provision::ProvisionArgs),

    /// Show saved stack outputs
    Outputs(outputs::OutputsArgs),

    /// Start an interactive chat session against the deployed agent
    Chat(chat::ChatArgs),
}
