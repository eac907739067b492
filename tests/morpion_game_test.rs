//! Tests for the morpion game controller.

use strictly_morpion::{Game, GameConfig, GameError, GameStatus, Mark, Square};

#[test]
fn test_row_win_on_classic_board() {
    let mut game = Game::new(3, 3, 3).unwrap();

    // A, B, A, B, A
    for (x, y) in [(0, 0), (1, 1), (1, 0), (2, 2)] {
        assert_eq!(game.play_move(x, y), Ok(GameStatus::InProgress));
    }
    assert_eq!(game.play_move(2, 0), Ok(GameStatus::Won(Mark::X)));

    assert_eq!(game.current_winner(), Some(Mark::X));
    assert_eq!(game.current_grid().row(0).unwrap(), vec![Square::Occupied(Mark::X); 3]);
}

#[test]
fn test_occupied_cell_does_not_grow_history() {
    let mut game = Game::new(8, 6, 4).unwrap();
    game.play_move(4, 3).unwrap();
    let len = game.history_len();

    let result = game.play_move(4, 3);
    assert!(matches!(result, Err(GameError::CellOccupied(_))));
    assert_eq!(game.history_len(), len);
    assert_eq!(game.current_player(), Mark::O);
}

#[test]
fn test_reset_after_any_play() {
    let mut game = Game::new(4, 4, 3).unwrap();
    for (x, y) in [(0, 0), (3, 3), (1, 1), (3, 2), (2, 2)] {
        game.play_move(x, y).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Won(Mark::X));
    game.rewind_to(1).unwrap();
    game.play_move(0, 3).unwrap();

    game.reset();
    assert_eq!(game.history_len(), 1);
    assert_eq!(game.current_winner(), None);
    assert_eq!(game.branch_marker_at(0), Ok(None));
}

#[test]
fn test_branch_trail_is_kept() {
    let mut game = Game::new(5, 5, 4).unwrap();
    for (x, y) in [(0, 0), (4, 4), (1, 0), (4, 3)] {
        game.play_move(x, y).unwrap();
    }

    game.rewind_to(2).unwrap();
    game.play_move(2, 2).unwrap();
    game.rewind_to(0).unwrap();

    let markers: Vec<Option<usize>> = (0..game.history_len())
        .map(|i| game.branch_marker_at(i).unwrap())
        .collect();
    assert_eq!(markers, vec![None, None, None, None, None, Some(2), None, Some(0)]);

    // Abandoned futures are still readable.
    let abandoned = game.history().get(4).unwrap();
    assert_eq!(abandoned.grid().get(4, 3), Square::Occupied(Mark::O));
    assert!(game.current_grid().as_slice().iter().all(|s| s.is_empty()));
}

#[test]
fn test_win_on_default_board_edges() {
    // 8x6, three in a row along the right edge.
    let mut game = Game::from_config(&GameConfig::default()).unwrap();
    for (x, y) in [(7, 0), (0, 5), (7, 1), (1, 5)] {
        game.play_move(x, y).unwrap();
    }
    assert_eq!(game.play_move(7, 2), Ok(GameStatus::Won(Mark::X)));
}

#[test]
fn test_win_on_anti_diagonal() {
    let mut game = Game::new(6, 6, 4).unwrap();
    for (x, y) in [(0, 5), (0, 0), (1, 4), (1, 0), (2, 3), (2, 0)] {
        game.play_move(x, y).unwrap();
    }
    assert_eq!(game.play_move(3, 2), Ok(GameStatus::Won(Mark::X)));
}

#[test]
fn test_rewind_restores_turn_order() {
    let mut game = Game::new(3, 3, 3).unwrap();
    game.play_move(0, 0).unwrap();
    game.play_move(1, 1).unwrap();
    game.play_move(2, 2).unwrap();

    game.rewind_to(1).unwrap();
    assert_eq!(game.current_player(), Mark::O);
    assert_eq!(game.current_grid().get(1, 1), Square::Empty);
    game.play_move(1, 1).unwrap();
    assert_eq!(game.current_grid().get(1, 1), Square::Occupied(Mark::O));
}

#[test]
fn test_unreachable_win_length_keeps_playing() {
    for win_length in [usize::MAX, 1 << 40] {
        let mut game = Game::new(3, 3, win_length).unwrap();
        for (x, y) in [(0, 0), (1, 1), (1, 0), (2, 2), (2, 0)] {
            assert_eq!(game.play_move(x, y), Ok(GameStatus::InProgress));
        }
        assert_eq!(game.history_len(), 6);
    }
}
