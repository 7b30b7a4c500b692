//! Error types for the game engine and the heuristic.

use crate::{GameStatus, Position};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// The cell index is outside 0-8.
    #[display("cell {} is off the board (expected 0-8)", _0)]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("{} is already occupied", _0)]
    Occupied(Position),

    /// Moves are only accepted while the game is in progress.
    #[display("game is {}", _0)]
    NotInProgress(GameStatus),
}

impl std::error::Error for InvalidMove {}

/// Error returned by [`GameEngine`](crate::GameEngine) and the heuristic.
///
/// Both variants are recoverable: the engine is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum EngineError {
    /// The move is illegal in the current session.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),

    /// The heuristic was asked to move on a full board.
    #[display("No legal moves remain")]
    #[from(skip)]
    NoLegalMoves,
}

impl EngineError {
    /// Returns the rejection reason for [`EngineError::InvalidMove`].
    pub fn invalid_move(&self) -> Option<InvalidMove> {
        match self {
            EngineError::InvalidMove(reason) => Some(*reason),
            EngineError::NoLegalMoves => None,
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidMove(reason) => Some(reason),
            EngineError::NoLegalMoves => None,
        }
    }
}
