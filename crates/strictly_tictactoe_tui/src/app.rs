//! Application state and logic.
//!
//! `App` is the event adapter between the terminal and the engine: it turns
//! key intents into engine calls, decides when the computer should reply,
//! and exposes what the UI needs to render. It never edits the board itself.

use crate::input::{Intent, move_cursor};
use crate::scheduler::{HeuristicScheduler, ShellEvent};
use strictly_tictactoe::{
    GameEngine, GameSession, GameStatus, HeuristicPlayer, Mode, Position, ScheduledOutcome,
};
use tracing::{debug, info, instrument, warn};

/// Main application state.
#[derive(Debug)]
pub struct App {
    engine: GameEngine,
    opponent: HeuristicPlayer,
    scheduler: HeuristicScheduler,
    cursor: Position,
    should_quit: bool,
}

impl App {
    /// Creates a new application waiting for a mode choice.
    pub fn new(opponent: HeuristicPlayer, scheduler: HeuristicScheduler) -> Self {
        Self {
            engine: GameEngine::new(),
            opponent,
            scheduler,
            cursor: Position::Center,
            should_quit: false,
        }
    }

    /// Read-only view of the game.
    pub fn session(&self) -> &GameSession {
        self.engine.session()
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True while the computer's reply is pending.
    pub fn is_thinking(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Mode keys work only from the menu; a finished game must be reset first.
    pub fn mode_keys_enabled(&self) -> bool {
        self.engine.status() == GameStatus::NotStarted
    }

    /// Reset does nothing useful from the menu.
    pub fn reset_enabled(&self) -> bool {
        self.engine.status() != GameStatus::NotStarted
    }

    /// Status line shown under the board.
    pub fn status_text(&self) -> String {
        match self.engine.status() {
            GameStatus::NotStarted => "Choose a game mode to start".to_string(),
            GameStatus::InProgress if self.is_thinking() => {
                format!("It's {}'s turn (thinking...)", self.engine.current_player())
            }
            GameStatus::InProgress => format!("It's {}'s turn", self.engine.current_player()),
            GameStatus::Won(player) => format!("Player {} has won!", player),
            GameStatus::Draw => "Game ended in a draw!".to_string(),
        }
    }

    /// Handles a key intent.
    #[instrument(skip(self))]
    pub fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Quit => self.should_quit = true,
            Intent::Start(mode) => self.start(mode),
            Intent::Reset => self.reset(),
            Intent::Place(position) => {
                self.cursor = position;
                self.place(position);
            }
            Intent::PlaceAtCursor => self.place(self.cursor),
            Intent::Cursor(key) => self.cursor = move_cursor(self.cursor, key),
        }
    }

    /// Handles an event from a background task.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::HeuristicReady { ticket, decision } => {
                match self.engine.apply_scheduled(&ticket, decision.position) {
                    Ok(ScheduledOutcome::Applied(status)) => {
                        self.scheduler.delivered();
                        info!(
                            position = %decision.position,
                            rule = %decision.rule,
                            %status,
                            "Computer moved"
                        );
                    }
                    Ok(ScheduledOutcome::Discarded) => {
                        debug!("Stale computer move ignored");
                    }
                    Err(e) => {
                        self.scheduler.delivered();
                        warn!(error = %e, "Computer move rejected");
                    }
                }
            }
        }
    }

    fn start(&mut self, mode: Mode) {
        if !self.mode_keys_enabled() {
            debug!(%mode, "Mode keys disabled until reset");
            return;
        }
        self.scheduler.cancel();
        self.engine.start(mode);
        self.cursor = Position::Center;
    }

    fn reset(&mut self) {
        if !self.reset_enabled() {
            return;
        }
        self.scheduler.cancel();
        self.engine.reset();
        self.cursor = Position::Center;
    }

    fn place(&mut self, position: Position) {
        if self.engine.status() != GameStatus::InProgress {
            debug!(%position, "Ignoring input outside a game");
            return;
        }
        if self.is_thinking() || self.engine.session().is_heuristic_turn() {
            debug!(%position, "Ignoring input while the computer is to move");
            return;
        }

        match self.engine.play_move(position.to_index()) {
            Ok(_) => self.reply_if_needed(),
            Err(e) => debug!(error = %e, "Ignoring rejected move"),
        }
    }

    /// Plans the computer's reply and hands it to the scheduler.
    fn reply_if_needed(&mut self) {
        let Some(ticket) = self.engine.plan_heuristic_move() else {
            return;
        };
        match self.opponent.select_move(ticket.board(), ticket.side()) {
            Ok(decision) => self.scheduler.schedule(ticket, decision),
            Err(e) => warn!(error = %e, "Computer could not choose a move"),
        }
    }
}
