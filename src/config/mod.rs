//! Configuration module for the Erlandi bot.
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::moderation::UserRef;

/// Bot running mode
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    #[default]
    Polling,
    Webhook,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<Url>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    /// Display name used in /help.
    pub bot_name: String,

    /// Owner user IDs (comma-separated). Owner-only commands accept these.
    pub owner_ids: Vec<UserRef>,

    // MongoDB
    /// When unset, settings live in process memory.
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
    pub store_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns error if a required variable is missing or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| var(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = non_empty("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let bot_mode = match non_empty("BOT_MODE").map(|m| m.to_lowercase()).as_deref() {
            None | Some("polling") => BotMode::Polling,
            Some("webhook") => BotMode::Webhook,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "BOT_MODE",
                    reason: format!("unknown mode {other:?}"),
                });
            }
        };

        let webhook_url = non_empty("WEBHOOK_URL")
            .map(|raw| {
                Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                    name: "WEBHOOK_URL",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        // Validate webhook URL is set if mode is webhook
        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            return Err(ConfigError::Missing("WEBHOOK_URL"));
        }

        let webhook_port = parse_or("WEBHOOK_PORT", non_empty("WEBHOOK_PORT"), 8443)?;
        let timeout_ms: u64 = parse_or("STORE_TIMEOUT_MS", non_empty("STORE_TIMEOUT_MS"), 3000)?;

        // OWNER_ID (single) and OWNER_IDS (list) are both accepted.
        let owner_ids = [non_empty("OWNER_ID"), non_empty("OWNER_IDS")]
            .into_iter()
            .flatten()
            .flat_map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        s.parse::<UserRef>().map_err(|e| ConfigError::Invalid {
                            name: "OWNER_IDS",
                            reason: e.to_string(),
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bot_token,
            bot_mode,
            webhook_url,
            webhook_port,
            webhook_secret: non_empty("WEBHOOK_SECRET"),
            bot_name: non_empty("BOT_NAME").unwrap_or_else(|| "Erlandi Security".to_string()),
            owner_ids,
            mongodb_uri: non_empty("MONGODB_URI"),
            mongodb_database: non_empty("MONGODB_DATABASE").unwrap_or_else(|| "erlandi".to_string()),
            store_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
