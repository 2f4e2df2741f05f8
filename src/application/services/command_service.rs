use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{Command, CommandRegistry, Message, Reply, Session, Variant};
use crate::domain::traits::Bot;

/// Service for managing and executing commands
///
/// Owns the session for one run of the loop, so the ping counter lives and
/// dies with it.
pub struct CommandService {
    registry: CommandRegistry,
    session: Session,
    variant: Variant,
}

impl CommandService {
    pub fn new(variant: Variant, timer_seconds: u64) -> Self {
        Self {
            registry: CommandRegistry::new(),
            session: Session::new(timer_seconds),
            variant,
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    /// Register the verbs spoken by the configured variant
    pub fn register_defaults(&mut self) {
        if self.variant.counts_pings() {
            self.register(Command::new("ping", |session, _| {
                    Reply::Line(format!("/message pong {}", session.record_ping()))
                })
                .with_description("Reply with a counted pong"));
        } else {
            self.register(Command::new("ping", |_, _| Reply::Line("pong".to_string()))
                .with_description("Reply with pong"));
        }

        self.register(Command::new("message", |_, args| {
                Reply::Line(Message::from_args(args).to_string())
            })
            .with_description("Relay a chat message")
            .with_params(vec!["author", "message"]));

        if self.variant.has_timer() {
            self.register(Command::new("timer", |session, _| {
                    Reply::Line(format!(
                        "/message the app was working for {} seconds",
                        session.timer_seconds()
                    ))
                })
                .with_description("Report how long the app has been working"));
        }

        self.register(Command::new("quit", |_, _| Reply::Quit("quitting".to_string()))
            .with_description("Stop the bot"));
    }

    /// Lines printed once before the first command is read
    pub fn startup_lines(&self) -> Vec<String> {
        if !self.variant.announces_start() {
            return Vec::new();
        }
        vec![
            "start".to_string(),
            format!("/timer {}", self.session.timer_seconds()),
        ]
    }

    /// Run the command named by `verb`, reading its argument lines from `bot`
    pub fn handle<B: Bot + ?Sized>(&mut self, verb: &str, bot: &mut B) -> Result<Reply, BotError> {
        let cmd = self.registry.find(verb)
            .ok_or_else(|| CommandError::NotFound(verb.to_string()))?;

        let mut args = Vec::with_capacity(cmd.arity());
        for &field in &cmd.params {
            let line = bot.next_line()?.ok_or_else(|| CommandError::Truncated {
                command: cmd.name.clone(),
                field,
            })?;
            args.push(line);
        }

        tracing::debug!(command = %cmd.name, args = args.len(), "dispatching command");

        Ok((cmd.handler)(&mut self.session, &args))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Registered verbs with their descriptions, sorted by verb
    pub fn describe(&self) -> Vec<(String, String)> {
        self.registry
            .names()
            .into_iter()
            .filter_map(|name| self.registry.find(name))
            .map(|cmd| (cmd.name.clone(), cmd.description.clone().unwrap_or_default()))
            .collect()
    }
}
