//! Terminal I/O error type.

use derive_more::{Display, Error};

/// Error raised by the terminal collaborators (input polling, drawing, mode switching).
#[derive(Debug, Clone, Display, Error)]
#[display("Terminal error: {} at {}:{}", message, file, line)]
pub struct TermError {
    pub message: String,
    pub line: u32,
    pub file: &'static str,
}

impl TermError {
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for TermError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}
