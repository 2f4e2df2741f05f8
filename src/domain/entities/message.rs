use std::fmt;

/// A chat message relayed into the bot by the `message` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub author: String,
    pub body: String,
}

impl Message {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
        }
    }

    /// Build a message from the argument lines of a `message` command
    pub fn from_args(args: &[String]) -> Self {
        let author = args.first().map(String::as_str).unwrap_or_default();
        let body = args.get(1).map(String::as_str).unwrap_or_default();
        Self::new(author, body)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user '{}' said: {}", self.author, self.body)
    }
}
