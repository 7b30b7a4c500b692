//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position};
use tracing::instrument;

/// The 8 winning triples, in evaluation order: rows, columns, diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the owner of the first complete line in [`WINNING_LINES`] order.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let player = board.get(a).player()?;
        (board.get(b).player() == Some(player) && board.get(c).player() == Some(player))
            .then_some(player)
    })
}

/// True if `player` owns all three squares of any line.
#[instrument(skip(board))]
pub fn has_line(board: &Board, player: Player) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos).player() == Some(player)))
}

/// True if placing `player` at the empty `pos` would give them a line.
///
/// Evaluated on a copy; `board` is never touched.
#[instrument(skip(board))]
pub fn completes_line(board: &Board, pos: Position, player: Player) -> bool {
    board.is_empty(pos) && has_line(&board.with_mark(pos, player), player)
}
