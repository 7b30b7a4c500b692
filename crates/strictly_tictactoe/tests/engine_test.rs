//! Tests for the game engine state machine.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use strictly_tictactoe::{
    Board, EngineError, GameEngine, GameStatus, InvalidMove, Mode, Player, Position, Square,
};

fn started() -> GameEngine {
    let mut engine = GameEngine::new();
    engine.start(Mode::TwoPlayer);
    engine
}

fn play_all(engine: &mut GameEngine, cells: &[usize]) {
    for &cell in cells {
        engine.play_move(cell).expect("Valid move");
    }
}

#[test]
fn test_random_games_keep_marks_balanced_and_turns_alternating() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..200 {
        let mut engine = started();
        let mut move_number = 1;

        while engine.status() == GameStatus::InProgress {
            let expected = if move_number % 2 == 1 { Player::X } else { Player::O };
            assert_eq!(engine.current_player(), expected);

            let moves = Position::valid_moves(engine.board());
            let pos = *moves.choose(&mut rng).expect("Game in progress has moves");
            engine.play_move(pos.to_index()).expect("Valid move");

            let x = engine.board().count(Player::X);
            let o = engine.board().count(Player::O);
            assert!(x == o || x == o + 1, "unbalanced board: {x} X vs {o} O");
            move_number += 1;
        }
    }
}

#[test]
fn test_occupied_square_rejected_without_change() {
    let mut engine = started();
    play_all(&mut engine, &[4]);
    let before = engine.session().clone();

    assert_eq!(
        engine.play_move(4),
        Err(EngineError::InvalidMove(InvalidMove::Occupied(Position::Center)))
    );
    assert_eq!(*engine.session(), before);
}

#[test]
fn test_out_of_range_rejected_without_change() {
    let mut engine = started();
    play_all(&mut engine, &[0, 8]);
    let before = engine.session().clone();

    for cell in [9, 10, usize::MAX] {
        assert_eq!(
            engine.play_move(cell),
            Err(EngineError::InvalidMove(InvalidMove::OutOfRange(cell)))
        );
        assert_eq!(*engine.session(), before);
    }
}

#[test]
fn test_win_on_fifth_move() {
    let mut engine = started();
    // X: 0, 1, 2. O: 3, 4.
    play_all(&mut engine, &[0, 3, 1, 4]);
    assert_eq!(engine.play_move(2), Ok(GameStatus::Won(Player::X)));

    assert_eq!(engine.status(), GameStatus::Won(Player::X));
    // The winner stays current.
    assert_eq!(engine.current_player(), Player::X);
    assert_eq!(engine.board().get(Position::TopRight), Square::Occupied(Player::X));
}

#[test]
fn test_no_moves_after_win() {
    let mut engine = started();
    play_all(&mut engine, &[0, 3, 1, 4, 2]);
    let before = engine.session().clone();

    assert_eq!(
        engine.play_move(8),
        Err(EngineError::InvalidMove(InvalidMove::NotInProgress(
            GameStatus::Won(Player::X)
        )))
    );
    assert_eq!(*engine.session(), before);
}

#[test]
fn test_draw_only_after_ninth_move() {
    // Final board: X O X / X O O / O X X
    let mut engine = started();
    let cells = [0, 1, 2, 4, 3, 5, 7, 6, 8];

    for (i, &cell) in cells.iter().enumerate() {
        let status = engine.play_move(cell).expect("Valid move");
        if i < cells.len() - 1 {
            assert_eq!(status, GameStatus::InProgress, "premature end after move {}", i + 1);
        } else {
            assert_eq!(status, GameStatus::Draw);
        }
    }

    let expected: Board = "XOX XOO OXX".parse().unwrap();
    assert_eq!(*engine.board(), expected);
}

#[test]
fn test_win_on_last_square_beats_draw() {
    // X fills the left column with the ninth mark.
    let mut engine = started();
    play_all(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 8]);
    assert_eq!(engine.play_move(6), Ok(GameStatus::Won(Player::X)));
}

#[test]
fn test_reset_is_idempotent() {
    let fresh = GameEngine::new();

    let mut engine = started();
    play_all(&mut engine, &[4, 0]);
    engine.reset();
    let once = engine.session().clone();
    engine.reset();

    assert_eq!(once, *fresh.session());
    assert_eq!(*engine.session(), *fresh.session());
    assert_eq!(engine.status(), GameStatus::NotStarted);
    assert_eq!(engine.current_player(), Player::X);
    assert_eq!(*engine.board(), Board::new());

    let mut untouched = GameEngine::new();
    untouched.reset();
    assert_eq!(*untouched.session(), *fresh.session());
}

#[test]
fn test_restart_after_game_over() {
    let mut engine = started();
    play_all(&mut engine, &[0, 3, 1, 4, 2]);

    engine.start(Mode::VsHeuristic);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.mode(), Some(Mode::VsHeuristic));
    assert_eq!(engine.current_player(), Player::X);
    assert_eq!(*engine.board(), Board::new());
}

#[test]
fn test_session_snapshot_serializes() {
    let mut engine = GameEngine::new();
    engine.start(Mode::VsHeuristic);
    play_all(&mut engine, &[4]);

    let json = serde_json::to_string(engine.session()).expect("Serialize session");
    let restored: strictly_tictactoe::GameSession =
        serde_json::from_str(&json).expect("Deserialize session");

    assert_eq!(&restored, engine.session());
    assert_eq!(restored.current_player(), Player::O);
    assert!(restored.is_heuristic_turn());
}
