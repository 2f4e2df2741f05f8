use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::application::errors::ConfigError;

/// Protocol flavor spoken on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Startup banner, counted pongs, `timer` command, no trailer after `quit`
    #[default]
    Counter,
    /// Bare `pong`, no banner, no `timer`, trailer printed after `quit`
    Plain,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Counter => "counter",
            Variant::Plain => "plain",
        }
    }

    pub fn announces_start(&self) -> bool {
        matches!(self, Variant::Counter)
    }

    pub fn counts_pings(&self) -> bool {
        matches!(self, Variant::Counter)
    }

    pub fn has_timer(&self) -> bool {
        matches!(self, Variant::Counter)
    }

    pub fn trailer_on_quit(&self) -> bool {
        matches!(self, Variant::Plain)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "counter" | "a" => Ok(Variant::Counter),
            "plain" | "b" => Ok(Variant::Plain),
            other => Err(ConfigError::InvalidValue(format!(
                "unknown variant '{}' (expected 'counter' or 'plain')",
                other
            ))),
        }
    }
}
