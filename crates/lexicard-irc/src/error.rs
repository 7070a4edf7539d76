//! Error types for line parsing.

use thiserror::Error;

/// Errors produced while parsing a raw IRC line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line was empty after stripping the line terminator.
    #[error("empty line")]
    EmptyLine,

    /// Tags or prefix were present but no command followed.
    #[error("missing command")]
    MissingCommand,

    /// The command contained characters other than letters and digits.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}
