//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// True when the input ran out in the middle of a command
    pub fn is_truncated_input(&self) -> bool {
        matches!(self, BotError::Command(CommandError::Truncated { .. }))
    }
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    /// Displays as the reply sent back for an unknown verb
    #[error("unexpected command: {0}")]
    NotFound(String),

    #[error("input ended while reading {field} for '{command}'")]
    Truncated {
        command: String,
        field: &'static str,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
