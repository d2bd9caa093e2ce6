//! # Configuration Module
//!
//! Startup configuration read from the environment (optionally seeded from a
//! `.env` file): the bot token and the group chat that receives submissions.

use tracing::warn;

pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const GROUP_VAR: &str = "GROUP";

/// Errors raised while loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable is unset or empty
    Missing(&'static str),
    /// Variable is set but cannot be parsed
    Invalid { var: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{var} is not set"),
            ConfigError::Invalid { var, value } => {
                write!(f, "{var} has invalid value: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    /// Chat id of the group receiving submissions
    pub group_chat_id: i64,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenv::dotenv() {
            warn!(error = %e, "No .env file loaded");
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = required(&lookup, TOKEN_VAR)?;
        let group = required(&lookup, GROUP_VAR)?;

        let group_chat_id = group
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::Invalid {
                var: GROUP_VAR,
                value: group.clone(),
            })?;

        Ok(Self {
            bot_token,
            group_chat_id,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            warn!(var, "Required configuration variable not set");
            Err(ConfigError::Missing(var))
        }
    }
}
