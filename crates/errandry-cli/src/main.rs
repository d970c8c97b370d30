//! Errandry CLI entry point.
//!
//! Binary name: `errandry`
//!
//! Parses CLI arguments, wires the transcript store and capability adapters,
//! then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,errandry=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "errandry", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;
    tracing::debug!(data_dir = %state.data_dir.display(), "state initialized");

    match cli.command {
        Commands::New => {
            cli::sessions::new_conversation(&state, cli.json).await?;
        }

        Commands::List => {
            cli::sessions::list_conversations(&state, cli.json).await?;
        }

        Commands::Rename { id, title } => {
            cli::sessions::rename_conversation(&state, &id, &title, cli.json).await?;
        }

        Commands::Clear { id } => {
            cli::sessions::clear_conversation(&state, &id, cli.json).await?;
        }

        Commands::Export { id } => {
            cli::sessions::export_conversation(&state, &id).await?;
        }

        Commands::Chat { id } => {
            cli::chat::run_chat(&state, id.as_deref()).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
