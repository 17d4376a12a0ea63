use std::io::{Stdout, Write, stdout};
use std::panic;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Stylize;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use tracing::{debug, warn};

use crate::board::{Board, Marker, Renderer, CELL_PAD};
use crate::error::TermError;

/// Owns the terminal while the game runs. Raw mode and the alternate screen
/// are switched on by `setup` and switched back off when this is dropped.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn setup() -> Result<Self, TermError> {
        let mut term = TermManager { stdout: stdout(), active: false };

        terminal::enable_raw_mode()?;
        term.active = true;
        execute!(term.stdout, EnterAlternateScreen, cursor::Hide, terminal::Clear(ClearType::All))?;

        debug!("terminal in raw mode");
        Ok(term)
    }

    /// Gives the terminal back. Safe to call more than once.
    pub fn restore(&mut self) -> Result<(), TermError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = terminal::disable_raw_mode();
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
        raw?;

        debug!("terminal restored");
        Ok(())
    }
}

/// Chains a panic hook that hands the terminal back before the previous hook
/// prints, so the panic message lands on the normal screen.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
        previous(info);
    }));
}

impl Renderer for TermManager {
    fn render(&mut self, board: &Board) -> Result<(), TermError> {
        let edge = board.edge_line();

        queue!(self.stdout, cursor::MoveTo(0, 0), style::Print(&edge))?;
        for (y, row) in board.rows().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16 + 1), style::Print('|'))?;
            for marker in row {
                match marker {
                    Marker::Empty => queue!(self.stdout, style::Print(marker.glyph()))?,
                    Marker::Snake => queue!(self.stdout, style::PrintStyledContent(marker.glyph().green().bold()))?,
                    Marker::Food => queue!(self.stdout, style::PrintStyledContent(marker.glyph().red().bold()))?,
                }
                queue!(self.stdout, style::Print(CELL_PAD))?;
            }
            queue!(self.stdout, style::Print('|'))?;
        }
        queue!(self.stdout, cursor::MoveTo(0, board.height() + 1), style::Print(&edge))?;

        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "failed to restore terminal");
        }
    }
}
