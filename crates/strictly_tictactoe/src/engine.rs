//! The rules state machine: turn order, legality, win and draw detection.

use crate::error::{EngineError, InvalidMove};
use crate::invariants::assert_invariants;
use crate::rules::{check_winner, is_full};
use crate::schedule::{ScheduledMove, ScheduledOutcome};
use crate::{Board, GameStatus, Mode, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Complete state of one game.
///
/// The session is the single source of truth for board, turn and status.
/// It is only mutated through [`GameEngine`]; everything else sees it
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    mode: Option<Mode>,
    status: GameStatus,
}

impl GameSession {
    /// Creates a session that has not started: empty board, X to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a session from raw parts without validation.
    ///
    /// Useful for restoring snapshots and for exercising invariants.
    pub fn from_parts(
        board: Board,
        current_player: Player,
        mode: Option<Mode>,
        status: GameStatus,
    ) -> Self {
        Self {
            board,
            current_player,
            mode,
            status,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose mark the next move places.
    ///
    /// After a win this stays on the winner.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Mode chosen at start, `None` before the first start and after reset.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True when the heuristic owns the side to move in a live game.
    pub fn is_heuristic_turn(&self) -> bool {
        self.status == GameStatus::InProgress
            && self.mode.and_then(Mode::heuristic_side) == Some(self.current_player)
    }
}

/// Tic-tac-toe game engine.
///
/// Wraps a [`GameSession`] and a generation counter. The generation changes
/// on every [`start`](Self::start) and [`reset`](Self::reset), which lets a
/// delayed heuristic move planned against an old session be recognised and
/// discarded.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    session: GameSession,
    generation: u64,
}

impl GameEngine {
    /// Creates an engine in the `NotStarted` state.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh game in `mode` with X to move.
    ///
    /// Accepted from any state; a running game is replaced.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn start(&mut self, mode: Mode) {
        self.generation = self.generation.wrapping_add(1);
        self.session = GameSession {
            board: Board::new(),
            current_player: Player::X,
            mode: Some(mode),
            status: GameStatus::InProgress,
        };
        info!(%mode, generation = self.generation, "Game started");
    }

    /// Places the current player's mark at `cell_index` (0-8).
    ///
    /// Returns the status after the move. On error nothing changes.
    #[instrument(skip(self), fields(player = %self.session.current_player))]
    pub fn play_move(&mut self, cell_index: usize) -> Result<GameStatus, EngineError> {
        let position = self.validate(cell_index).inspect_err(|reason| {
            warn!(%reason, "Move rejected");
        })?;
        Ok(self.apply(position))
    }

    /// Checks a move against the session without applying it.
    fn validate(&self, cell_index: usize) -> Result<Position, InvalidMove> {
        if self.session.status != GameStatus::InProgress {
            return Err(InvalidMove::NotInProgress(self.session.status));
        }

        let position = Position::from_index(cell_index).ok_or(InvalidMove::OutOfRange(cell_index))?;

        if !self.session.board.is_empty(position) {
            return Err(InvalidMove::Occupied(position));
        }

        Ok(position)
    }

    /// Applies a validated move and updates the status.
    fn apply(&mut self, position: Position) -> GameStatus {
        let player = self.session.current_player;
        self.session.board.set(position, Square::Occupied(player));
        debug!(%position, %player, "Mark placed");

        // Win takes precedence over draw on the last square.
        if let Some(winner) = check_winner(&self.session.board) {
            info!(%winner, "Game won");
            self.session.status = GameStatus::Won(winner);
        } else if is_full(&self.session.board) {
            info!("Game drawn");
            self.session.status = GameStatus::Draw;
        } else {
            self.session.current_player = player.opponent();
        }

        assert_invariants(&self.session);
        self.session.status
    }

    /// Returns to `NotStarted` with an empty board and X to move.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.session = GameSession::new();
        info!(generation = self.generation, "Game reset");
    }

    /// Returns the current session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.session.board
    }

    /// Returns the player to move (the winner once a game is won).
    pub fn current_player(&self) -> Player {
        self.session.current_player
    }

    /// Mode of the current game, if one was started.
    pub fn mode(&self) -> Option<Mode> {
        self.session.mode
    }

    /// Counter bumped on every start and reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Plans a heuristic move for the current session.
    ///
    /// Returns `None` unless the heuristic is to move. The returned ticket
    /// carries a snapshot of the board for the heuristic to search.
    #[instrument(skip(self))]
    pub fn plan_heuristic_move(&self) -> Option<ScheduledMove> {
        if !self.session.is_heuristic_turn() {
            return None;
        }
        let ticket = ScheduledMove::new(
            self.generation,
            self.session.current_player,
            self.session.board,
        );
        debug!(generation = self.generation, side = %ticket.side(), "Heuristic move planned");
        Some(ticket)
    }

    /// True if `ticket` still describes the live session.
    pub fn is_current(&self, ticket: &ScheduledMove) -> bool {
        ticket.generation() == self.generation
            && *ticket.board() == self.session.board
            && ticket.side() == self.session.current_player
            && self.session.status == GameStatus::InProgress
    }

    /// Applies a previously planned move, unless the session moved on.
    ///
    /// A stale ticket (reset, restart, or any move since planning) is
    /// discarded without touching the session.
    #[instrument(skip(self, ticket), fields(generation = ticket.generation()))]
    pub fn apply_scheduled(
        &mut self,
        ticket: &ScheduledMove,
        position: Position,
    ) -> Result<ScheduledOutcome, EngineError> {
        if !self.is_current(ticket) {
            info!(
                current_generation = self.generation,
                "Discarding stale heuristic move"
            );
            return Ok(ScheduledOutcome::Discarded);
        }
        self.play_move(position.to_index())
            .map(ScheduledOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(mode: Mode) -> GameEngine {
        let mut engine = GameEngine::new();
        engine.start(mode);
        engine
    }

    #[test]
    fn test_new_engine_not_started() {
        let engine = GameEngine::new();
        assert_eq!(engine.status(), GameStatus::NotStarted);
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(engine.mode(), None);
        assert_eq!(*engine.board(), Board::new());
    }

    #[test]
    fn test_move_rejected_before_start() {
        let mut engine = GameEngine::new();
        assert_eq!(
            engine.play_move(4),
            Err(EngineError::InvalidMove(InvalidMove::NotInProgress(
                GameStatus::NotStarted
            )))
        );
    }

    #[test]
    fn test_moves_alternate() {
        let mut engine = started(Mode::TwoPlayer);
        assert_eq!(engine.play_move(4), Ok(GameStatus::InProgress));
        assert_eq!(engine.current_player(), Player::O);
        assert_eq!(engine.play_move(0), Ok(GameStatus::InProgress));
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(engine.board().get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(engine.board().get(Position::TopLeft), Square::Occupied(Player::O));
    }

    #[test]
    fn test_start_bumps_generation() {
        let mut engine = GameEngine::new();
        let before = engine.generation();
        engine.start(Mode::VsHeuristic);
        assert_ne!(engine.generation(), before);
        let started = engine.generation();
        engine.reset();
        assert_ne!(engine.generation(), started);
    }

    #[test]
    fn test_plan_only_on_heuristic_turn() {
        let mut engine = started(Mode::VsHeuristic);
        assert!(engine.plan_heuristic_move().is_none());
        engine.play_move(0).unwrap();
        let ticket = engine.plan_heuristic_move().unwrap();
        assert_eq!(ticket.side(), Player::O);
        assert!(engine.is_current(&ticket));

        let mut two_player = started(Mode::TwoPlayer);
        two_player.play_move(0).unwrap();
        assert!(two_player.plan_heuristic_move().is_none());
    }

    #[test]
    fn test_apply_scheduled_move() {
        let mut engine = started(Mode::VsHeuristic);
        engine.play_move(0).unwrap();
        let ticket = engine.plan_heuristic_move().unwrap();

        let outcome = engine.apply_scheduled(&ticket, Position::Center).unwrap();
        assert_eq!(outcome, ScheduledOutcome::Applied(GameStatus::InProgress));
        assert_eq!(engine.board().get(Position::Center), Square::Occupied(Player::O));
        assert_eq!(engine.current_player(), Player::X);
    }

    #[test]
    fn test_scheduled_move_discarded_after_reset() {
        let mut engine = started(Mode::VsHeuristic);
        engine.play_move(0).unwrap();
        let ticket = engine.plan_heuristic_move().unwrap();

        engine.reset();
        engine.start(Mode::VsHeuristic);
        engine.play_move(0).unwrap();

        // Same board and side as when planned, but a different session.
        assert_eq!(*ticket.board(), *engine.board());
        let outcome = engine.apply_scheduled(&ticket, Position::Center).unwrap();
        assert_eq!(outcome, ScheduledOutcome::Discarded);
        assert!(engine.board().is_empty(Position::Center));
        assert_eq!(engine.current_player(), Player::O);
    }
}
