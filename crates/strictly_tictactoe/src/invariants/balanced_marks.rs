//! Balanced marks invariant: X is never behind O, and never two ahead.

use super::Invariant;
use crate::{GameSession, Player};

/// Invariant: `count(X) - count(O)` is 0 or 1.
///
/// X moves first and turns strictly alternate, so O can never lead.
pub struct BalancedMarksInvariant;

impl Invariant<GameSession> for BalancedMarksInvariant {
    fn holds(session: &GameSession) -> bool {
        let x = session.board().count(Player::X);
        let o = session.board().count(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X has the same number of marks as O, or exactly one more"
    }
}
