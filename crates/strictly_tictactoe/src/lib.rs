//! Pure tic-tac-toe game logic.
//!
//! - [`GameEngine`] owns a [`GameSession`] and enforces the rules: X moves
//!   first, turns alternate, three in a row wins, a full board without a
//!   line is a draw.
//! - [`HeuristicPlayer`] picks a move for the computer side with a greedy
//!   priority policy (win, block, center, random).
//! - [`ScheduledMove`] lets a presentation layer delay the heuristic move
//!   and still drop it safely if the game was reset in the meantime.
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{GameEngine, GameStatus, HeuristicPlayer, Mode, Player};
//!
//! let mut engine = GameEngine::new();
//! engine.start(Mode::VsHeuristic);
//! engine.play_move(0).unwrap();
//!
//! let mut opponent = HeuristicPlayer::with_seed(7);
//! let decision = opponent.select_move(engine.board(), Player::O).unwrap();
//! engine.play_move(decision.position.to_index()).unwrap();
//!
//! assert_eq!(engine.status(), GameStatus::InProgress);
//! assert_eq!(engine.current_player(), Player::X);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod heuristic;
pub mod invariants;
mod position;
pub mod rules;
mod schedule;
mod types;

pub use engine::{GameEngine, GameSession};
pub use error::{EngineError, InvalidMove};
pub use heuristic::{Decision, HeuristicPlayer, Rule, select_move};
pub use position::Position;
pub use schedule::{ScheduledMove, ScheduledOutcome};
pub use types::{Board, BoardParseError, GameStatus, Mode, Player, Square};
