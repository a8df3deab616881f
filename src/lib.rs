//! Two-player tic-tac-toe for the terminal.
//!
//! Play on one screen, or keep two screens in sync over a direct TCP
//! connection between peers.
//!
//! # Architecture
//!
//! - **Games**: board, win check and the move reducer
//! - **Peer**: one session, one remote peer, newline-delimited JSON messages
//! - **Tui**: ratatui front end and the loop that ties input to the peer link
//! - **Config**: TOML settings with command-line overrides
//!
//! # Example
//!
//! ```
//! use peer_tictactoe::{Game, Mark, MoveOutcome};
//!
//! let mut game = Game::new();
//! for index in [0, 4, 1, 5] {
//!     game.play(index);
//! }
//! assert_eq!(game.play(2), MoveOutcome::Won(Mark::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod games;
pub mod peer;
pub mod tui;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Action, Board, Game, GameState, IgnoreReason, LINES, Mark, MoveOutcome, Position,
    SnapshotOutcome, Square, check_winner, reduce, winning_line,
};

// Crate-level exports - Peer relay
pub use peer::{
    MAX_LINE_BYTES, PeerError, PeerErrorKind, PeerEvent, PeerHandle, PeerMessage, PeerSession,
    RelayPayload,
};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};
