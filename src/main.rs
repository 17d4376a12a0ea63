mod board;
mod error;
mod game;
mod input;
mod snake;
mod term;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use game::{GameState, Outcome, Settings};
use input::TermInput;
use term::TermManager;

pub type TermInt = u16;

const DEFAULT_LOG_FILE: &str = "snake.log";

fn main() -> Result<()> {
    init_logging()?;
    term::install_panic_hook();

    let mut state = GameState::new(Settings::default());
    let mut input = TermInput::new();

    let outcome = {
        // Dropping the manager hands the terminal back, whichever way we leave.
        let mut term = TermManager::setup()?;
        let outcome = game::run(&mut state, &mut input, &mut term)?;
        term.restore()?;
        outcome
    };

    // The alternate screen is gone by now; leave the last board in view.
    for line in state.board().frame_lines() {
        println!("{}", line);
    }

    match outcome {
        Outcome::Crashed { length } => {
            println!("Game over! Final length: {} (score: {})", length, state.score());
        }
        Outcome::Quit { length } => {
            println!("Quit with a length of {}.", length);
        }
    }

    info!(?outcome, "exiting");
    Ok(())
}

// Logs go to a file so they never land on top of the board.
fn init_logging() -> Result<()> {
    let path = std::env::var("SNAKE_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let log_file = std::fs::File::create(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(log = %path, "starting snake");
    Ok(())
}
