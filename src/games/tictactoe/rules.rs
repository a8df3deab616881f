//! Game engine: move acceptance, win check and turn toggle.

pub mod win;

use super::action::{Action, reduce};
use super::position::Position;
use super::types::{Board, GameState, Mark, Square};
use tracing::{debug, info, instrument, warn};

/// Why a move was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IgnoreReason {
    /// Index outside 0-8.
    #[display("index out of range")]
    OutOfRange,
    /// Target cell already marked.
    #[display("cell already marked")]
    Occupied,
    /// A triplet is already complete.
    #[display("game is over")]
    GameOver,
}

/// Result of offering a move to the game.
///
/// `Ignored` leaves the state untouched; it is reported only so callers can
/// log or skip relaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Cell marked, turn passed to `next`.
    Placed {
        /// Mark that was placed.
        mark: Mark,
        /// Mark to move next.
        next: Mark,
    },
    /// Cell marked and it completed a triplet.
    Won(Mark),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl MoveOutcome {
    /// Whether the board changed.
    pub fn accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Ignored(_))
    }
}

/// Result of merging a remote board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotOutcome {
    /// Cells copied from the snapshot.
    pub applied: usize,
    /// Cells where the snapshot disagreed with a local mark.
    pub conflicts: usize,
    /// Whether the merge completed a triplet.
    pub won: bool,
}

/// Tic-tac-toe game engine.
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Mark to move next.
    pub fn current(&self) -> Mark {
        self.state.current()
    }

    /// Mark that completed a triplet, once the game is won.
    pub fn winning_mark(&self) -> Option<Mark> {
        if self.state.winner() {
            win::check_winner(self.state.board())
        } else {
            None
        }
    }

    /// Whether a triplet has been completed.
    pub fn is_over(&self) -> bool {
        self.state.winner()
    }

    /// Empty positions.
    pub fn available(&self) -> Vec<Position> {
        Position::valid_moves(self.state.board())
    }

    /// Offers a move at `index` for the current mark.
    #[instrument(skip(self), fields(current = %self.state.current()))]
    pub fn play(&mut self, index: usize) -> MoveOutcome {
        let reason = if self.state.winner() {
            Some(IgnoreReason::GameOver)
        } else {
            match self.state.board().get(index) {
                None => Some(IgnoreReason::OutOfRange),
                Some(Square::Occupied(_)) => Some(IgnoreReason::Occupied),
                Some(Square::Empty) => None,
            }
        };
        if let Some(reason) = reason {
            debug!(%reason, "Move ignored");
            return MoveOutcome::Ignored(reason);
        }

        let mark = self.state.current();
        self.state = reduce(&self.state, Action::MakeMove(index));
        if self.settle() {
            info!(%mark, index, "Winning move");
            MoveOutcome::Won(mark)
        } else {
            debug!(%mark, index, "Move placed");
            MoveOutcome::Placed {
                mark,
                next: self.state.current(),
            }
        }
    }

    /// Copies every remotely marked cell that is still empty here.
    ///
    /// Local marks are never overwritten. The win check and turn toggle run
    /// once if anything was copied.
    #[instrument(skip_all)]
    pub fn apply_snapshot(&mut self, snapshot: &Board) -> SnapshotOutcome {
        let mut outcome = SnapshotOutcome::default();
        if self.state.winner() {
            debug!("Snapshot ignored, game is over");
            return outcome;
        }

        let local = *self.state.board().squares();
        for (index, (ours, theirs)) in local.iter().zip(snapshot.squares()).enumerate() {
            match (ours, theirs) {
                (Square::Empty, Square::Occupied(mark)) => {
                    self.state.board_mut().mark(index, *mark);
                    outcome.applied += 1;
                }
                (Square::Occupied(a), Square::Occupied(b)) if a != b => outcome.conflicts += 1,
                (Square::Occupied(_), Square::Empty) => outcome.conflicts += 1,
                _ => {}
            }
        }

        if outcome.conflicts > 0 {
            warn!(conflicts = outcome.conflicts, "Snapshot disagrees with local board");
        }
        if outcome.applied > 0 {
            outcome.won = self.settle();
        }
        debug!(?outcome, "Snapshot merged");
        outcome
    }

    /// Post-mutation step: set the winner flag or pass the turn.
    /// Returns whether the game is now won.
    fn settle(&mut self) -> bool {
        let action = if win::check_winner(self.state.board()).is_some() {
            Action::SetWinner
        } else {
            Action::NextTurn
        };
        self.state = reduce(&self.state, action);
        action == Action::SetWinner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_marks() {
        let mut game = Game::new();
        assert_eq!(game.current(), Mark::X);
        assert_eq!(
            game.play(4),
            MoveOutcome::Placed { mark: Mark::X, next: Mark::O }
        );
        assert_eq!(
            game.play(0),
            MoveOutcome::Placed { mark: Mark::O, next: Mark::X }
        );
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut game = Game::new();
        game.play(4);
        assert_eq!(game.play(4), MoveOutcome::Ignored(IgnoreReason::Occupied));
        assert_eq!(game.play(12), MoveOutcome::Ignored(IgnoreReason::OutOfRange));
        assert_eq!(game.current(), Mark::O);
    }

    #[test]
    fn test_snapshot_copies_new_cells_and_toggles_once() {
        let mut game = Game::new();
        let mut remote = Game::new();
        remote.play(4);

        let outcome = game.apply_snapshot(remote.board());
        assert_eq!(outcome, SnapshotOutcome { applied: 1, conflicts: 0, won: false });
        assert_eq!(game.board(), remote.board());
        assert_eq!(game.current(), Mark::O);
    }

    #[test]
    fn test_identical_snapshot_changes_nothing() {
        let mut game = Game::new();
        game.play(4);
        let before = game.state().clone();
        let outcome = game.apply_snapshot(&before.board().clone());
        assert_eq!(outcome, SnapshotOutcome::default());
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_snapshot_never_overwrites_local_mark() {
        let mut game = Game::new();
        game.play(0);
        let mut other = Board::new();
        other.mark(0, Mark::O);
        other.mark(1, Mark::O);

        let outcome = game.apply_snapshot(&other);
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.conflicts, 1);
        assert_eq!(game.board().get(0), Some(Square::Occupied(Mark::X)));
        assert_eq!(game.board().get(1), Some(Square::Occupied(Mark::O)));
    }

    #[test]
    fn test_winning_snapshot_sets_winner() {
        let mut game = Game::new();
        let mut snapshot = Board::new();
        for i in [2, 4, 6] {
            snapshot.mark(i, Mark::O);
        }
        let outcome = game.apply_snapshot(&snapshot);
        assert!(outcome.won);
        assert!(game.is_over());
        assert_eq!(game.winning_mark(), Some(Mark::O));
    }
}
