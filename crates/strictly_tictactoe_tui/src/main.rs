//! Strictly Tic-Tac-Toe - terminal shell over the `strictly_tictactoe` engine.

#![warn(missing_docs)]

mod app;
mod cli;
mod config;
mod input;
mod scheduler;
mod simulate;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Command};
use config::ShellConfig;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use scheduler::{HeuristicScheduler, ShellEvent};
use std::io;
use std::time::Duration;
use strictly_tictactoe::HeuristicPlayer;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Simulate { games, seed }) => {
            let config = ShellConfig::load_or_default(&cli.config)?.with_overrides(None, seed);
            init_stderr_logging(&config);
            let tally = simulate::run_simulation(games, *config.seed())?;
            println!("{}", tally);
        }
        Some(Command::Play { delay_ms, seed }) => {
            let config = ShellConfig::load_or_default(&cli.config)?.with_overrides(delay_ms, seed);
            run_tui(config).await?;
        }
        None => {
            let config = ShellConfig::load_or_default(&cli.config)?;
            run_tui(config).await?;
        }
    }

    Ok(())
}

fn env_filter(config: &ShellConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

fn init_stderr_logging(config: &ShellConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(io::stderr)
        .init();
}

/// Runs the terminal UI until the user quits.
async fn run_tui(config: ShellConfig) -> Result<()> {
    // Log to a file so traces don't scribble over the TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(
        delay_ms = config.heuristic_delay_ms(),
        seed = ?config.seed(),
        "Starting Strictly Tic-Tac-Toe"
    );

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let scheduler = HeuristicScheduler::new(config.heuristic_delay(), event_tx);
    let mut app = App::new(HeuristicPlayer::from_seed(*config.seed()), scheduler);

    let mut terminal = setup_terminal()?;
    let res = run_app(&mut terminal, &mut app, &mut event_rx).await;
    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Exiting");
    res
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Switches to raw mode and the alternate screen.
///
/// If any step after raw mode fails, the terminal is restored before the
/// error is returned.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    with_rollback(
        || {
            execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
            Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
        },
        || {
            if let Err(e) = restore_terminal() {
                error!(error = ?e, "Failed to restore terminal");
            }
        },
    )
}

/// Runs `step`, calling `rollback` only if it fails.
fn with_rollback<T>(step: impl FnOnce() -> Result<T>, rollback: impl FnOnce()) -> Result<T> {
    let result = step();
    if result.is_err() {
        rollback();
    }
    result
}

/// Leaves the alternate screen and raw mode.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<ShellEvent>,
) -> Result<()> {
    loop {
        let mut screen = Rect::default();
        terminal.draw(|f| {
            screen = f.area();
            ui::draw(f, app);
        })?;

        while let Ok(shell_event) = event_rx.try_recv() {
            app.handle_event(shell_event);
        }

        if event::poll(Duration::from_millis(50))? {
            let intent = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::intent_for(key.code),
                Event::Mouse(mouse) => input::intent_for_mouse(screen, mouse),
                _ => None,
            };
            if let Some(intent) = intent {
                app.handle_intent(intent);
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        // Let the scheduler's tasks run between polls.
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_runs_only_on_failure() {
        let mut rolled_back = false;
        let ok = with_rollback(|| Ok(7), || rolled_back = true);
        assert_eq!(ok.unwrap(), 7);
        assert!(!rolled_back);

        let failed: Result<()> = with_rollback(
            || Err(anyhow::anyhow!("alternate screen unavailable")),
            || rolled_back = true,
        );
        assert!(failed.is_err());
        assert!(rolled_back);
    }
}
