use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::error::TermError;
use crate::snake::Direction::{self, *};

/// What the player asked for during one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Steer(Direction),
    Quit,
}

/// Non-blocking source of at most one input per call.
pub trait InputSource {
    fn poll(&mut self) -> Result<Option<Input>, TermError>;
}

/// Keyboard input read from the terminal through crossterm.
pub struct TermInput;

pub fn intent_for_key(ch: char) -> Option<Direction> {
    match ch {
        'w' => Some(Up),
        'a' => Some(Left),
        's' => Some(Down),
        'd' => Some(Right),
        _ => None,
    }
}

/// Maps a key press to an input, `None` for keys the game ignores.
pub fn input_for_event(ev: &KeyEvent) -> Option<Input> {
    if is_ctrl_c(ev) {
        return Some(Input::Quit);
    }

    let dir = match ev.code {
        KeyCode::Char(ch) => intent_for_key(ch),
        KeyCode::Up => Some(Up),
        KeyCode::Left => Some(Left),
        KeyCode::Down => Some(Down),
        KeyCode::Right => Some(Right),
        _ => None,
    };

    dir.map(Input::Steer)
}

impl TermInput {
    pub fn new() -> Self {
        TermInput
    }
}

/// Picks the input for one tick out of every key press queued since the
/// last one. Quit wins wherever it appears; otherwise the first press decides.
pub fn input_for_tick(events: impl IntoIterator<Item = KeyEvent>) -> Option<Input> {
    let mut first: Option<KeyEvent> = None;

    for ev in events {
        if ev.kind != KeyEventKind::Press {
            continue;
        }
        if is_ctrl_c(&ev) {
            return Some(Input::Quit);
        }
        if first.is_none() {
            first = Some(ev);
        }
    }

    first.as_ref().and_then(input_for_event)
}

impl InputSource for TermInput {
    /// Drains everything pending so input never carries over to the next tick.
    fn poll(&mut self) -> Result<Option<Input>, TermError> {
        let mut keys = Vec::new();

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                keys.push(ev);
            }
        }

        let count = keys.len();
        let input = input_for_tick(keys);
        if count > 0 {
            trace!(count, ?input, "keys read");
        }
        Ok(input)
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
