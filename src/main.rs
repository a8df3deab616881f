//! Peer Tic-Tac-Toe - terminal client

use anyhow::Result;
use clap::Parser;
use peer_tictactoe::AppConfig;
use peer_tictactoe::cli::{Cli, Command};
use peer_tictactoe::tui::{self, GameMode};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Local => {
            initialize_tracing(&config)?;
            tui::run(GameMode::Local, config, None).await
        }
        Command::Peer { bind, join, payload } => {
            let config = config.with_overrides(bind, payload);
            initialize_tracing(&config)?;
            tui::run(GameMode::Peer, config, join).await
        }
    }
}

/// Logs to a file so output does not interfere with the TUI.
#[instrument(skip(config))]
fn initialize_tracing(config: &AppConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(log_file = %config.log_file().display(), "Tracing initialized");
    Ok(())
}
