//! Command-line interface for peer_tictactoe.

use crate::config::DEFAULT_CONFIG_FILE;
use crate::peer::RelayPayload;
use clap::{Parser, Subcommand};

/// Peer Tic-Tac-Toe - two players, one board, optionally two screens
#[derive(Parser, Debug)]
#[command(name = "peer_tictactoe")]
#[command(about = "Two-player tic-tac-toe, local or over a direct peer connection", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (optional; defaults apply when missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Both players share this terminal
    Local,

    /// Play against one remote peer
    Peer {
        /// Address to listen on when creating a room
        #[arg(long)]
        bind: Option<String>,

        /// Join this room id (host:port) on start
        #[arg(long)]
        join: Option<String>,

        /// What each local move forwards to the peer
        #[arg(long, value_enum)]
        payload: Option<RelayPayload>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_peer_flags() {
        let cli = Cli::parse_from([
            "peer_tictactoe",
            "peer",
            "--join",
            "10.0.0.2:7878",
            "--payload",
            "board",
        ]);
        match cli.command {
            Command::Peer { bind, join, payload } => {
                assert_eq!(bind, None);
                assert_eq!(join.as_deref(), Some("10.0.0.2:7878"));
                assert_eq!(payload, Some(RelayPayload::Board));
            }
            Command::Local => panic!("expected peer"),
        }
        assert_eq!(cli.config, std::path::PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
