//! First-class invariants for tic-tac-toe sessions.
//!
//! Invariants are logical properties that must hold after every accepted
//! move. They are testable independently and the engine asserts them in
//! debug builds.

pub mod alternating_turn;
pub mod balanced_marks;

pub use alternating_turn::AlternatingTurnInvariant;
pub use balanced_marks::BalancedMarksInvariant;

use crate::GameSession;
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so sets compose without boxing.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (BalancedMarksInvariant, AlternatingTurnInvariant);

/// Asserts the session invariants (debug builds only).
#[instrument(skip(session))]
pub fn assert_invariants(session: &GameSession) {
    let result = SessionInvariants::check_all(session);
    if let Err(violations) = &result {
        for violation in violations {
            warn!(%violation, "Session invariant violated");
        }
    }
    debug_assert!(result.is_ok(), "Session invariants violated: {:?}", result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GameEngine, Mode, Player};

    #[test]
    fn test_invariant_set_holds_for_fresh_session() {
        assert!(SessionInvariants::check_all(&GameSession::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut engine = GameEngine::new();
        engine.start(Mode::TwoPlayer);
        for cell in [0, 4, 2] {
            engine.play_move(cell).unwrap();
        }
        assert!(SessionInvariants::check_all(engine.session()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let board: Board = "XXX ___ ___".parse().unwrap();
        let session = GameSession::from_parts(
            board,
            Player::X,
            Some(Mode::TwoPlayer),
            crate::GameStatus::InProgress,
        );

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
