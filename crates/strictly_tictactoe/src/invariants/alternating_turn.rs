//! Alternating turn invariant: the side to move follows from the marks.

use super::Invariant;
use crate::{GameSession, GameStatus, Player};

/// Invariant: the current player is consistent with the board and status.
///
/// - While in progress, X is to move exactly when the mark counts are equal.
/// - After a win the winner made the last move and stays current.
/// - A draw always ends on X's fifth mark.
/// - Before a game starts the board is empty and X is current.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSession> for AlternatingTurnInvariant {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        let x = board.count(Player::X);
        let o = board.count(Player::O);
        let current = session.current_player();

        match session.status() {
            GameStatus::NotStarted => board.filled() == 0 && current == Player::X,
            GameStatus::InProgress => (current == Player::X) == (x == o),
            GameStatus::Won(winner) => {
                let last_mover = if x > o { Player::X } else { Player::O };
                winner == current && winner == last_mover
            }
            GameStatus::Draw => x == 5 && o == 4 && current == Player::X,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...) and the winner moved last"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GameEngine, Mode};

    #[test]
    fn test_holds_through_a_full_game() {
        let mut engine = GameEngine::new();
        assert!(AlternatingTurnInvariant::holds(engine.session()));

        engine.start(Mode::TwoPlayer);
        for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            engine.play_move(cell).unwrap();
            assert!(AlternatingTurnInvariant::holds(engine.session()));
        }
        assert_eq!(engine.status(), GameStatus::Draw);
    }

    #[test]
    fn test_wrong_side_to_move_violates() {
        let board: Board = "X__ ___ ___".parse().unwrap();
        let session = GameSession::from_parts(
            board,
            Player::X,
            Some(Mode::TwoPlayer),
            GameStatus::InProgress,
        );
        assert!(!AlternatingTurnInvariant::holds(&session));
    }

    #[test]
    fn test_winner_must_have_moved_last() {
        let board: Board = "XXX OO_ ___".parse().unwrap();
        let won_by_x = GameSession::from_parts(
            board,
            Player::X,
            Some(Mode::TwoPlayer),
            GameStatus::Won(Player::X),
        );
        assert!(AlternatingTurnInvariant::holds(&won_by_x));

        let won_by_o = GameSession::from_parts(
            board,
            Player::O,
            Some(Mode::TwoPlayer),
            GameStatus::Won(Player::O),
        );
        assert!(!AlternatingTurnInvariant::holds(&won_by_o));
    }
}
