//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod message;
pub mod session;
pub mod variant;

pub use command::{Command, CommandRegistry, Reply};
pub use message::Message;
pub use session::Session;
pub use variant::Variant;
