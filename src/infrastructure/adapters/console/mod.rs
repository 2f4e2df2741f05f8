//! Console adapter - line transport over stdin/stdout/stderr

use std::io::{self, BufRead, Write};

use crate::application::errors::BotError;
use crate::domain::traits::{Bot, BotInfo};

/// Console bot adapter
///
/// Generic over its streams so the loop can be driven from memory in tests.
pub struct ConsoleAdapter<R, W, E> {
    info: BotInfo,
    input: Option<R>,
    output: W,
    errors: E,
}

impl ConsoleAdapter<io::StdinLock<'static>, io::Stdout, io::Stderr> {
    /// Adapter bound to the process's standard streams
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> ConsoleAdapter<R, W, E> {
    pub fn new(name: impl Into<String>, input: R, output: W, errors: E) -> Self {
        Self {
            info: BotInfo {
                name: name.into(),
                transport: "console".to_string(),
            },
            input: Some(input),
            output,
            errors,
        }
    }
}

#[cfg(test)]
impl<R, W, E> ConsoleAdapter<R, W, E> {
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn errors(&self) -> &E {
        &self.errors
    }
}

#[cfg(test)]
impl ConsoleAdapter<io::Cursor<Vec<u8>>, Vec<u8>, Vec<u8>> {
    /// In-memory adapter fed with `text`
    pub fn from_text(text: &str) -> Self {
        Self::new(
            "test-bot",
            io::Cursor::new(text.as_bytes().to_vec()),
            Vec::new(),
            Vec::new(),
        )
    }
}

/// Drop a trailing `\n` or `\r\n`
fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

impl<R: BufRead, W: Write, E: Write> Bot for ConsoleAdapter<R, W, E> {
    fn next_line(&mut self) -> Result<Option<String>, BotError> {
        let Some(input) = self.input.as_mut() else {
            return Ok(None);
        };

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }

    fn send_message(&mut self, text: &str) -> Result<(), BotError> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn report_error(&mut self, text: &str) -> Result<(), BotError> {
        write!(self.errors, "{}", text)?;
        self.errors.flush()?;
        Ok(())
    }

    fn release_input(&mut self) {
        if self.input.take().is_some() {
            tracing::debug!("Console input released");
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
