//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};

/// The eight triplets checked for a win.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first triplet (in [`LINES`] order) whose three
/// squares are equal and non-empty.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).and_then(|[a, _, _]| board.at(a).mark())
}

/// Returns the first completed triplet, if any.
pub fn winning_line(board: &Board) -> Option<[Position; 3]> {
    LINES.into_iter().find(|&[a, b, c]| {
        let sq = board.at(a);
        sq != Square::Empty && sq == board.at(b) && sq == board.at(c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(Position, Mark)]) -> Board {
        let mut board = Board::new();
        for (pos, mark) in cells {
            board.mark(pos.to_index(), *mark);
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            for mark in [Mark::X, Mark::O] {
                let board = board_with(&line.map(|p| (p, mark)));
                assert_eq!(check_winner(&board), Some(mark), "line {line:?}");
                assert_eq!(winning_line(&board), Some(line));
            }
        }
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = board_with(&[
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::O),
            (Position::TopRight, Mark::X),
        ]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[(Position::TopLeft, Mark::X), (Position::TopCenter, Mark::X)]);
        assert_eq!(check_winner(&board), None);
    }
}
