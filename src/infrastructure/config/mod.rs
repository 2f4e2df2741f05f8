//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::domain::entities::Variant;

/// Bot configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    #[serde(default)]
    pub variant: Variant,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "sample-bot".to_string(),
            variant: Variant::Counter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionConfig {
    pub timer_seconds: u64,
    /// Print the trailer after `quit`; unset means the variant decides
    pub trailer_on_quit: Option<bool>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timer_seconds: 10,
            trailer_on_quit: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Default config with environment overrides applied
    pub fn load_env() -> Self {
        let mut config = Config::default();
        if let Err(e) = config.apply_env(|key| std::env::var(key).ok()) {
            tracing::warn!("Ignoring environment override: {}", e);
        }
        config
    }

    /// Apply `SAMPLE_BOT_VARIANT` and `SAMPLE_BOT_TIMER_SECONDS` through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(variant) = lookup("SAMPLE_BOT_VARIANT") {
            self.bot.variant = variant.parse()?;
        }

        if let Some(seconds) = lookup("SAMPLE_BOT_TIMER_SECONDS") {
            self.session.timer_seconds = seconds.trim().parse().map_err(|_| {
                ConfigError::InvalidValue(format!("SAMPLE_BOT_TIMER_SECONDS='{}'", seconds))
            })?;
        }

        Ok(())
    }

    pub fn trailer_on_quit(&self) -> bool {
        self.session
            .trailer_on_quit
            .unwrap_or_else(|| self.bot.variant.trailer_on_quit())
    }
}
