//! Tickets for heuristic moves applied after a delay.
//!
//! A [`ScheduledMove`] records which session a heuristic move was planned
//! for. [`GameEngine::apply_scheduled`](crate::GameEngine::apply_scheduled)
//! compares it against the live session and discards it if anything changed,
//! so a reset during the delay cannot leak a move into the next game.

use crate::{Board, GameStatus, Player};
use serde::{Deserialize, Serialize};

/// A heuristic move planned against one session generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMove {
    generation: u64,
    side: Player,
    board: Board,
}

impl ScheduledMove {
    pub(crate) fn new(generation: u64, side: Player, board: Board) -> Self {
        Self {
            generation,
            side,
            board,
        }
    }

    /// Engine generation the move was planned for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Side the heuristic plays.
    pub fn side(&self) -> Player {
        self.side
    }

    /// Snapshot of the board at planning time.
    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// What happened to a scheduled move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledOutcome {
    /// The move was played; carries the resulting status.
    Applied(GameStatus),
    /// The session changed since planning; nothing was played.
    Discarded,
}
