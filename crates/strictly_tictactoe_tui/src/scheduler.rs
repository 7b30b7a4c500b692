//! Delayed delivery of the computer's reply.
//!
//! The heuristic decides immediately on a board snapshot; the scheduler only
//! holds the answer back for a moment so the human sees their own mark
//! first. Each pending reply runs on its own tokio task that can be aborted,
//! and carries the [`ScheduledMove`] ticket so the engine can still refuse
//! it if the session changed.

use strictly_tictactoe::{Decision, ScheduledMove};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{debug, instrument};

/// Events delivered from background tasks to the UI loop.
#[derive(Debug, Clone, Copy)]
pub enum ShellEvent {
    /// The computer's reply is ready to be applied.
    HeuristicReady {
        /// Session the reply was planned for.
        ticket: ScheduledMove,
        /// The heuristic's choice.
        decision: Decision,
    },
}

/// Owns at most one pending heuristic reply.
#[derive(Debug)]
pub struct HeuristicScheduler {
    delay: Duration,
    event_tx: mpsc::UnboundedSender<ShellEvent>,
    pending: Option<JoinHandle<()>>,
}

impl HeuristicScheduler {
    /// Creates a scheduler that delivers replies on `event_tx` after `delay`.
    pub fn new(delay: Duration, event_tx: mpsc::UnboundedSender<ShellEvent>) -> Self {
        Self {
            delay,
            event_tx,
            pending: None,
        }
    }

    /// Schedules `decision` for delivery, replacing any pending reply.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self, ticket), fields(generation = ticket.generation()))]
    pub fn schedule(&mut self, ticket: ScheduledMove, decision: Decision) {
        self.cancel();

        let delay = self.delay;
        let event_tx = self.event_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            // The receiver is gone only when the UI is shutting down.
            if event_tx
                .send(ShellEvent::HeuristicReady { ticket, decision })
                .is_err()
            {
                debug!("UI closed before heuristic reply was delivered");
            }
        }));
    }

    /// Aborts the pending reply, if any.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!("Cancelling pending heuristic reply");
            handle.abort();
        }
    }

    /// Marks the pending reply as delivered.
    pub fn delivered(&mut self) {
        self.pending = None;
    }

    /// True while a reply is scheduled and not yet handled by the UI.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for HeuristicScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
