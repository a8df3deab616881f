//! Tests for move acceptance, win detection and turn order.

use peer_tictactoe::{
    Board, Game, IgnoreReason, LINES, Mark, MoveOutcome, SnapshotOutcome, Square,
};

#[test]
fn test_example_game_top_row_wins_for_x() {
    let mut game = Game::new();
    for index in [0, 4, 1, 5] {
        assert!(game.play(index).accepted());
    }
    assert_eq!(game.play(2), MoveOutcome::Won(Mark::X));
    assert!(game.is_over());
    assert_eq!(game.winning_mark(), Some(Mark::X));
}

#[test]
fn test_every_triplet_freezes_the_game() {
    for line in LINES {
        let indices = line.map(|p| p.to_index());
        // X takes the line, O fills cells outside it
        let mut spare = (0..9).filter(|i| !indices.contains(i));
        let mut game = Game::new();
        for (n, x) in indices.iter().enumerate() {
            let outcome = game.play(*x);
            if n < 2 {
                assert!(matches!(outcome, MoveOutcome::Placed { .. }), "line {line:?}");
                let o = spare.next().unwrap();
                let outcome = game.play(o);
                assert!(matches!(outcome, MoveOutcome::Placed { .. }), "line {line:?}");
            } else {
                assert_eq!(outcome, MoveOutcome::Won(Mark::X), "line {line:?}");
            }
        }

        let frozen = game.state().clone();
        for index in 0..9 {
            assert_eq!(game.play(index), MoveOutcome::Ignored(IgnoreReason::GameOver));
        }
        assert_eq!(game.state(), &frozen);
    }
}

#[test]
fn test_occupied_and_out_of_range_are_noops() {
    let mut game = Game::new();
    game.play(3);
    let before = game.state().clone();

    assert_eq!(game.play(3), MoveOutcome::Ignored(IgnoreReason::Occupied));
    assert_eq!(game.play(9), MoveOutcome::Ignored(IgnoreReason::OutOfRange));
    assert_eq!(game.play(100), MoveOutcome::Ignored(IgnoreReason::OutOfRange));
    assert_eq!(game.state(), &before);
}

#[test]
fn test_turn_alternates_from_x() {
    let mut game = Game::new();
    let mut expected = Mark::X;
    // Order chosen so nobody wins before the board is full
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        assert_eq!(game.current(), expected);
        match game.play(index) {
            MoveOutcome::Placed { mark, next } => {
                assert_eq!(mark, expected);
                assert_eq!(next, expected.opponent());
            }
            other => panic!("unexpected outcome {other:?} at {index}"),
        }
        expected = expected.opponent();
    }
    assert!(!game.is_over());
    assert!(game.available().is_empty());
}

#[test]
fn test_marks_are_never_overwritten() {
    let mut game = Game::new();
    game.play(4);
    game.play(4);
    game.play(0);
    assert_eq!(game.board().get(4), Some(Square::Occupied(Mark::X)));
    assert_eq!(game.board().get(0), Some(Square::Occupied(Mark::O)));

    let mut squares = [Square::Occupied(Mark::X); 9];
    squares[4] = Square::Occupied(Mark::O);
    let outcome = game.apply_snapshot(&Board::from_squares(squares));
    assert_eq!(outcome.conflicts, 2);
    assert_eq!(game.board().get(4), Some(Square::Occupied(Mark::X)));
    assert_eq!(game.board().get(0), Some(Square::Occupied(Mark::O)));
}

#[test]
fn test_snapshot_after_win_changes_nothing() {
    let mut game = Game::new();
    for index in [0, 4, 1, 5, 2] {
        game.play(index);
    }
    assert!(game.is_over());
    let before = game.state().clone();

    let outcome = game.apply_snapshot(&Board::from_squares([Square::Occupied(Mark::O); 9]));
    assert_eq!(outcome, SnapshotOutcome::default());
    assert_eq!(game.state(), &before);
    assert_eq!(game.board().get(8), Some(Square::Empty));
}
