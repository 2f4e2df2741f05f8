//! Message dispatcher - Runs the command loop against a bot

use crate::application::errors::{BotError, CommandError};
use crate::application::services::CommandService;
use crate::domain::traits::Bot;

/// Diagnostic written to the error channel when the loop fails
pub const DIAGNOSTIC: &str = "unexpected error";

/// Trailer written after the loop ends without failing
pub const TRAILER: &str = "end";

/// How the loop ended
#[derive(Debug)]
pub enum Exit {
    /// A `quit` command was handled
    Quit,
    /// Input ran out between commands
    EndOfInput,
    /// Reading, writing or an argument read failed
    Failed(BotError),
}

/// Message dispatcher - reads verbs, routes them to commands, writes replies
pub struct MessageDispatcher {
    commands: CommandService,
    trailer_on_quit: bool,
}

impl MessageDispatcher {
    pub fn new(commands: CommandService, trailer_on_quit: bool) -> Self {
        Self {
            commands,
            trailer_on_quit,
        }
    }

    /// Run the loop to completion.
    ///
    /// The input is released on every path before the trailer or the
    /// diagnostic is written.
    pub fn run<B: Bot>(&mut self, bot: &mut B) -> Exit {
        let info = bot.bot_info();
        tracing::info!(
            bot = %info.name,
            transport = %info.transport,
            variant = %self.commands.variant(),
            "Command loop started"
        );

        let exit = self.serve(bot).unwrap_or_else(Exit::Failed);
        bot.release_input();
        self.finish(bot, &exit);

        tracing::info!(
            pings = self.commands.session().ping_count(),
            exit = ?exit,
            "Command loop stopped"
        );
        exit
    }

    fn serve<B: Bot>(&mut self, bot: &mut B) -> Result<Exit, BotError> {
        for line in self.commands.startup_lines() {
            bot.send_message(&line)?;
        }

        // Whitespace-only lines are held back until a real verb follows them.
        // If the input ends first they are dropped and the loop ends normally.
        let mut blanks = Vec::new();
        while let Some(line) = bot.next_line()? {
            if line.trim().is_empty() {
                blanks.push(line);
                continue;
            }

            for blank in std::mem::take(&mut blanks) {
                if self.dispatch(&blank, bot)? {
                    return Ok(Exit::Quit);
                }
            }
            if self.dispatch(&line, bot)? {
                return Ok(Exit::Quit);
            }
        }

        if !blanks.is_empty() {
            tracing::debug!(count = blanks.len(), "Dropping trailing blank lines");
        }
        Ok(Exit::EndOfInput)
    }

    /// Handle one verb and write its reply. Returns true when the loop should stop.
    fn dispatch<B: Bot>(&mut self, verb: &str, bot: &mut B) -> Result<bool, BotError> {
        match self.commands.handle(verb, bot) {
            Ok(reply) => {
                bot.send_message(reply.text())?;
                Ok(reply.is_quit())
            }
            Err(BotError::Command(err @ CommandError::NotFound(_))) => {
                tracing::debug!(verb = %verb, "Unknown verb");
                bot.send_message(&err.to_string())?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn finish<B: Bot>(&self, bot: &mut B, exit: &Exit) {
        let result = match exit {
            Exit::Quit if !self.trailer_on_quit => Ok(()),
            Exit::Quit | Exit::EndOfInput => bot.send_message(TRAILER),
            Exit::Failed(e) => {
                if e.is_truncated_input() {
                    tracing::debug!("Input ended mid-command: {}", e);
                } else {
                    tracing::warn!("Command loop failed: {}", e);
                }
                bot.report_error(DIAGNOSTIC)
            }
        };

        if let Err(e) = result {
            tracing::debug!("Failed to write final output: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use crate::domain::entities::Variant;
    use crate::domain::traits::BotInfo;
    use crate::infrastructure::adapters::console::ConsoleAdapter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    /// Run the loop over `input`, returning the exit, stdout and stderr
    fn run(variant: Variant, input: &str) -> (Exit, String, String) {
        init_tracing();
        let mut commands = CommandService::new(variant, 10);
        commands.register_defaults();
        let mut dispatcher = MessageDispatcher::new(commands, variant.trailer_on_quit());

        let mut bot = ConsoleAdapter::from_text(input);
        let exit = dispatcher.run(&mut bot);
        let out = String::from_utf8(bot.output().clone()).unwrap();
        let err = String::from_utf8(bot.errors().clone()).unwrap();
        (exit, out, err)
    }

    #[test]
    fn test_banner_and_trailer_on_empty_input() {
        let (exit, out, err) = run(Variant::Counter, "");
        assert!(matches!(exit, Exit::EndOfInput));
        assert_eq!(out, "start\n/timer 10\nend\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_counted_pings() {
        let (_, out, _) = run(Variant::Counter, "ping\nping\n");
        assert_eq!(out, "start\n/timer 10\n/message pong 1\n/message pong 2\nend\n");
    }

    #[test]
    fn test_message_relay() {
        let (_, out, _) = run(Variant::Counter, "message\nalice\nhello\n");
        assert_eq!(out, "start\n/timer 10\nuser 'alice' said: hello\nend\n");
    }

    #[test]
    fn test_quit_stops_reading() {
        let (exit, out, err) = run(Variant::Counter, "quit\nping\n");
        assert!(matches!(exit, Exit::Quit));
        assert_eq!(out, "start\n/timer 10\nquitting\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_truncated_message_reports_error_without_trailer() {
        let (exit, out, err) = run(Variant::Counter, "ping\nmessage\nalice\n");
        match exit {
            Exit::Failed(e) => assert!(e.is_truncated_input()),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(out, "start\n/timer 10\n/message pong 1\n");
        assert_eq!(err, "unexpected error");
    }

    #[test]
    fn test_unknown_verb_keeps_loop_alive() {
        let (_, out, _) = run(Variant::Counter, "foo\nping\n");
        assert_eq!(out, "start\n/timer 10\nunexpected command: foo\n/message pong 1\nend\n");
    }

    #[test]
    fn test_one_reply_per_command() {
        let input = "ping\nmessage\nbob\nhi there\ntimer\nnope\nping\n";
        let (_, out, _) = run(Variant::Counter, input);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "start",
                "/timer 10",
                "/message pong 1",
                "user 'bob' said: hi there",
                "/message the app was working for 10 seconds",
                "unexpected command: nope",
                "/message pong 2",
                "end",
            ]
        );
    }

    #[test]
    fn test_plain_variant() {
        let (exit, out, err) = run(Variant::Plain, "ping\ntimer\nquit\nping\n");
        assert!(matches!(exit, Exit::Quit));
        assert_eq!(out, "pong\nunexpected command: timer\nquitting\nend\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let (_, out, _) = run(Variant::Plain, "message\r\nalice\r\nhello\r\n");
        assert_eq!(out, "user 'alice' said: hello\nend\n");
    }

    #[test]
    fn test_trailing_blank_lines_end_input() {
        let (exit, out, err) = run(Variant::Counter, "ping\n\n  \n");
        assert!(matches!(exit, Exit::EndOfInput));
        assert_eq!(out, "start\n/timer 10\n/message pong 1\nend\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_blank_lines_before_a_verb_are_unknown_commands() {
        let (_, out, _) = run(Variant::Plain, "\n \nping\n\n");
        assert_eq!(out, "unexpected command: \nunexpected command:  \npong\nend\n");
    }

    #[test]
    fn test_blank_author_is_not_skipped() {
        let (_, out, _) = run(Variant::Plain, "message\n\nhi\n");
        assert_eq!(out, "user '' said: hi\nend\n");
    }

    /// Bot that records every call in order
    struct RecordingBot {
        input: VecDeque<String>,
        released: bool,
        events: Vec<String>,
    }

    impl RecordingBot {
        fn new(lines: &[&str]) -> Self {
            Self {
                input: lines.iter().map(|l| l.to_string()).collect(),
                released: false,
                events: Vec::new(),
            }
        }

        fn release_position(&self) -> usize {
            self.events
                .iter()
                .position(|e| e == "release")
                .expect("input was never released")
        }
    }

    impl Bot for RecordingBot {
        fn next_line(&mut self) -> Result<Option<String>, BotError> {
            if self.released {
                return Ok(None);
            }
            Ok(self.input.pop_front())
        }

        fn send_message(&mut self, text: &str) -> Result<(), BotError> {
            self.events.push(format!("send:{}", text));
            Ok(())
        }

        fn report_error(&mut self, text: &str) -> Result<(), BotError> {
            self.events.push(format!("error:{}", text));
            Ok(())
        }

        fn release_input(&mut self) {
            self.released = true;
            self.events.push("release".to_string());
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo {
                name: "recording".to_string(),
                transport: "memory".to_string(),
            }
        }
    }

    fn run_recorded(variant: Variant, lines: &[&str]) -> (Exit, RecordingBot) {
        init_tracing();
        let mut commands = CommandService::new(variant, 10);
        commands.register_defaults();
        let mut dispatcher = MessageDispatcher::new(commands, variant.trailer_on_quit());
        let mut bot = RecordingBot::new(lines);
        let exit = dispatcher.run(&mut bot);
        (exit, bot)
    }

    #[test]
    fn test_input_released_before_trailer_at_end_of_input() {
        let (exit, bot) = run_recorded(Variant::Counter, &["ping"]);
        assert!(matches!(exit, Exit::EndOfInput));
        let release = bot.release_position();
        assert_eq!(bot.events[release - 1], "send:/message pong 1");
        assert_eq!(bot.events[release + 1..], ["send:end".to_string()]);
    }

    #[test]
    fn test_input_released_before_trailer_after_quit() {
        let (exit, bot) = run_recorded(Variant::Plain, &["quit", "ping"]);
        assert!(matches!(exit, Exit::Quit));
        assert_eq!(bot.events, vec!["send:quitting", "release", "send:end"]);

        // Without a quit trailer the release is the last thing that happens
        let (_, bot) = run_recorded(Variant::Counter, &["quit"]);
        assert_eq!(bot.events.last().map(String::as_str), Some("release"));
        assert_eq!(bot.events[bot.release_position() - 1], "send:quitting");
    }

    #[test]
    fn test_input_released_before_diagnostic_on_failure() {
        let (exit, bot) = run_recorded(Variant::Counter, &["message", "alice"]);
        assert!(matches!(exit, Exit::Failed(_)));
        let release = bot.release_position();
        assert_eq!(bot.events[release + 1..], ["error:unexpected error".to_string()]);
        assert!(!bot.events.iter().any(|e| e == "send:end"));
    }

    #[test]
    fn test_trailer_on_quit_override() {
        init_tracing();
        let mut commands = CommandService::new(Variant::Counter, 3);
        commands.register_defaults();
        let mut dispatcher = MessageDispatcher::new(commands, true);

        let mut bot = ConsoleAdapter::from_text("quit\n");
        dispatcher.run(&mut bot);
        let out = String::from_utf8(bot.output().clone()).unwrap();
        assert_eq!(out, "start\n/timer 3\nquitting\nend\n");
    }
}
