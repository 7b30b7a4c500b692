//! Heuristic self-play through the engine.

use strictly_tictactoe::{EngineError, GameEngine, GameStatus, HeuristicPlayer, Mode, Player};
use tracing::{debug, info, instrument};

/// Results of a batch of self-play games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
#[display("X wins: {}, O wins: {}, draws: {}", x_wins, o_wins, draws)]
pub struct Tally {
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Games drawn.
    pub draws: u32,
}

impl Tally {
    /// Total games counted.
    pub fn total(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    fn record(&mut self, status: GameStatus) {
        match status.winner() {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None if status == GameStatus::Draw => self.draws += 1,
            None => {}
        }
    }
}

/// Plays `games` heuristic-vs-heuristic games and counts the outcomes.
///
/// Both sides share one player so a seed reproduces the whole run.
#[instrument(skip(seed))]
pub fn run_simulation(games: u32, seed: Option<u64>) -> Result<Tally, EngineError> {
    let mut player = HeuristicPlayer::from_seed(seed);
    let mut engine = GameEngine::new();
    let mut tally = Tally::default();

    for game in 0..games {
        engine.start(Mode::TwoPlayer);
        while !engine.status().is_over() {
            let decision = player.select_move(engine.board(), engine.current_player())?;
            engine.play_move(decision.position.to_index())?;
        }
        debug!(game, status = %engine.status(), board = %engine.board().display(), "Game finished");
        tally.record(engine.status());
        engine.reset();
    }

    info!(%tally, "Simulation complete");
    Ok(tally)
}
