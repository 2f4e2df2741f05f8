use crate::application::errors::BotError;

/// Bot trait - abstraction over the line-oriented transport the loop talks to
pub trait Bot {
    /// Read the next input line without its terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted or has been released.
    fn next_line(&mut self) -> Result<Option<String>, BotError>;

    /// Write one response line
    fn send_message(&mut self, text: &str) -> Result<(), BotError>;

    /// Write a diagnostic to the error channel
    fn report_error(&mut self, text: &str) -> Result<(), BotError>;

    /// Give up the input handle. Later reads return `Ok(None)`.
    fn release_input(&mut self);

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub name: String,
    pub transport: String,
}
