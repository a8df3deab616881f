//! Tic-tac-toe: board, win check and the move reducer.

mod action;
mod position;
mod rules;
mod types;

pub use action::{Action, reduce};
pub use position::Position;
pub use rules::win::{LINES, check_winner, winning_line};
pub use rules::{Game, IgnoreReason, MoveOutcome, SnapshotOutcome};
pub use types::{Board, GameState, Mark, Square};
