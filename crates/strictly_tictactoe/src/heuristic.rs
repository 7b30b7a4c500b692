//! Greedy one-ply opponent.
//!
//! The policy is a fixed priority list, first satisfied rule wins:
//!
//! 1. [`Rule::WinNow`]: complete one of our own lines.
//! 2. [`Rule::Block`]: occupy the square that would complete an opponent line.
//! 3. [`Rule::Center`]: take the center.
//! 4. [`Rule::Random`]: any empty square, uniformly.
//!
//! Rules 1 and 2 scan empty squares in ascending index order and evaluate
//! each hypothesis on a copy of the board. There is no lookahead, so forks
//! go unnoticed and the player can be beaten.

use crate::error::EngineError;
use crate::rules::completes_line;
use crate::{Board, Player, Position};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The rule that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Rule {
    /// Completes a line for the side to move.
    #[display("win now")]
    WinNow,
    /// Stops the opponent completing a line next turn.
    #[display("block")]
    Block,
    /// Takes the center square.
    #[display("take center")]
    Center,
    /// Uniform pick among empty squares.
    #[display("random")]
    Random,
}

/// A chosen square and why it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Square to play.
    pub position: Position,
    /// Rule that selected it.
    pub rule: Rule,
}

/// Selects a move for `side` on `board`.
///
/// `board` is a read-only snapshot; it is never modified. Fails with
/// [`EngineError::NoLegalMoves`] when the board is full.
#[instrument(skip(board, rng), fields(board = %board.display()))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    side: Player,
    rng: &mut R,
) -> Result<Decision, EngineError> {
    let empty = Position::valid_moves(board);
    if empty.is_empty() {
        return Err(EngineError::NoLegalMoves);
    }

    let decision = if let Some(position) = first_completing(board, &empty, side) {
        Decision {
            position,
            rule: Rule::WinNow,
        }
    } else if let Some(position) = first_completing(board, &empty, side.opponent()) {
        Decision {
            position,
            rule: Rule::Block,
        }
    } else if board.is_empty(Position::Center) {
        Decision {
            position: Position::Center,
            rule: Rule::Center,
        }
    } else {
        let position = *empty.choose(rng).ok_or(EngineError::NoLegalMoves)?;
        Decision {
            position,
            rule: Rule::Random,
        }
    };

    debug!(position = %decision.position, rule = %decision.rule, "Heuristic decision");
    Ok(decision)
}

/// First square in `candidates` where `player` would complete a line.
fn first_completing(board: &Board, candidates: &[Position], player: Player) -> Option<Position> {
    candidates
        .iter()
        .copied()
        .find(|&pos| completes_line(board, pos, player))
}

/// Heuristic opponent owning its random source.
///
/// Seed it for reproducible games; otherwise it draws from the OS.
#[derive(Debug, Clone)]
pub struct HeuristicPlayer {
    rng: StdRng,
}

impl HeuristicPlayer {
    /// Creates a player seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a player whose random choices are reproducible.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a seeded player when `seed` is set, an OS-seeded one otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Selects a move for `side`. See [`select_move`].
    pub fn select_move(&mut self, board: &Board, side: Player) -> Result<Decision, EngineError> {
        select_move(board, side, &mut self.rng)
    }
}

impl Default for HeuristicPlayer {
    fn default() -> Self {
        Self::new()
    }
}
