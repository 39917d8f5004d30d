//! Chat command - Interactive terminal session against the deployed agent.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use agentkit_chat::{ChatSession, EnvTokenProvider, HttpAgentClient, TurnRole};
use agentkit_cloud::StackOutputs;

#[derive(Args)]
pub struct ChatArgs {
    /// API base URL; defaults to the one in the saved stack outputs
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Workspace directory holding `.agentkit/outputs.json`
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,
}

pub async fn execute(args: ChatArgs) -> Result<()> {
    let endpoint = match args.endpoint {
        Some(endpoint) => endpoint,
        None => {
            let path = args.workspace.join(".agentkit").join("outputs.json");
            let outputs = StackOutputs::load(&path).with_context(|| {
                format!(
                    "No endpoint given and outputs not found at {} (pass --endpoint or run \
                     `agentkit provision`)",
                    path.display()
                )
            })?;
            outputs.api.api_url
        }
    };

    let client = HttpAgentClient::new(&endpoint, Box::new(EnvTokenProvider::default()));
    let mut session = ChatSession::new(client);

    println!("💬 Chatting with {}", endpoint);
    println!("   /clear starts a fresh session, /quit exits.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear_session();
                println!("   Session cleared; the next message starts a new one.");
                continue;
            }
            _ => {}
        }

        session.send_turn(input).await?;

        if let Some(turn) = session.last_turn() {
            if turn.role == TurnRole::Assistant {
                println!("agent> {}\n", turn.content);
            }
        }
        if let Some(id) = session.session_id() {
            println!("   [session {}]", id);
        }
    }

    println!("👋 Bye.");
    Ok(())
}
