use std::collections::HashMap;

use super::Session;

/// What a command handler wants written back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Write the line and keep reading commands
    Line(String),
    /// Write the line and stop the loop
    Quit(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Line(s) | Reply::Quit(s) => s,
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Reply::Quit(_))
    }
}

/// Command handler function type
///
/// Receives the session and the argument lines read after the verb.
pub type CommandHandler = Box<dyn Fn(&mut Session, &[String]) -> Reply + Send + Sync>;

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    /// Names of the argument lines that follow the verb, in order
    pub params: Vec<&'static str>,
    pub handler: CommandHandler,
}

impl Command {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Session, &[String]) -> Reply + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            params: Vec::new(),
            handler: Box::new(handler),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_params(mut self, params: Vec<&'static str>) -> Self {
        self.params = params;
        self
    }

    /// Number of extra input lines this command consumes
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Command registry for managing available commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    /// Verbs are matched exactly, case included
    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.get(input)
    }

    /// Registered verbs, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
