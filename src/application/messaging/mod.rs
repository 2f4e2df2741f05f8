//! Messaging - The command loop that moves lines between the bot and its commands

pub mod dispatcher;

pub use dispatcher::{Exit, MessageDispatcher};
