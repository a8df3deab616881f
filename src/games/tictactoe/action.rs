//! State transitions as first-class actions.
//!
//! Every change to a [`GameState`] goes through [`reduce`], which never
//! mutates its input and returns the state unchanged when an action does
//! not apply.

use super::types::GameState;
use tracing::{instrument, trace};

/// A single state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Action {
    /// Mark the cell at the index with the current mark.
    #[display("MakeMove({_0})")]
    MakeMove(usize),
    /// Hand the turn to the other mark.
    #[display("NextTurn")]
    NextTurn,
    /// Freeze the game: a triplet has been completed.
    #[display("SetWinner")]
    SetWinner,
}

/// Applies `action` to `state`, returning the next state.
///
/// `MakeMove` is a no-op once a winner exists, for an index outside 0-8, or
/// for an occupied cell.
#[instrument(level = "trace", skip_all, fields(action = %action))]
pub fn reduce(state: &GameState, action: Action) -> GameState {
    let mut next = state.clone();
    match action {
        Action::MakeMove(index) => {
            if !state.winner() {
                let mark = state.current();
                if !next.board_mut().mark(index, mark) {
                    trace!(index, "Cell unavailable");
                }
            }
        }
        Action::NextTurn => next.set_current(state.current().opponent()),
        Action::SetWinner => next.set_winner(),
    }
    next
}
