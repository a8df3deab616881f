//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Mark placed by a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Mark {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
///
/// Serialized as `null` when empty and `"X"`/`"O"` when occupied, so a board
/// snapshot reads as a plain nine-element array on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Mark>", into = "Option<Mark>")]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Option<Mark>> for Square {
    fn from(mark: Option<Mark>) -> Self {
        mark.map_or(Square::Empty, Square::Occupied)
    }
}

impl From<Square> for Option<Mark> {
    fn from(square: Square) -> Self {
        square.mark()
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from nine squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index, `None` outside 0-8.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Gets the square at a named position.
    pub fn at(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if the square at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn marked(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Marks an empty square. Returns `false` if the index is out of range
    /// or the square is already taken; the board is left untouched then.
    pub(crate) fn mark(&mut self, index: usize, mark: Mark) -> bool {
        match self.squares.get_mut(index) {
            Some(square) if *square == Square::Empty => {
                *square = Square::Occupied(mark);
                true
            }
            _ => false,
        }
    }
}

/// Complete game state: the board, the turn bit and the winner flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current: Mark,
    winner: bool,
}

impl GameState {
    /// Creates a fresh game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            winner: false,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that places next (or placed last, once won).
    pub fn current(&self) -> Mark {
        self.current
    }

    /// Whether a triplet has been completed.
    pub fn winner(&self) -> bool {
        self.winner
    }

    pub(super) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(super) fn set_current(&mut self, mark: Mark) {
        self.current = mark;
    }

    pub(super) fn set_winner(&mut self) {
        self.winner = true;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_rejects_taken_and_out_of_range() {
        let mut board = Board::new();
        assert!(board.mark(4, Mark::X));
        assert!(!board.mark(4, Mark::O));
        assert!(!board.mark(9, Mark::O));
        assert_eq!(board.get(4), Some(Square::Occupied(Mark::X)));
        assert_eq!(board.marked(), 1);
    }

    #[test]
    fn test_board_serializes_as_flat_array() {
        let mut board = Board::new();
        board.mark(1, Mark::X);
        board.mark(3, Mark::O);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"[null,"X",null,"O",null,null,null,null,null]"#);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
