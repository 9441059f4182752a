//! Per-chat moderation settings.
//!
//! [`ChatConfig`] is the resolved view of all settings keys for one chat.
//! [`ChatSettings`] reads and writes them through the [`ConfigStore`].
//! Integer settings are clamped before they are written, so the store never
//! holds an out-of-domain value written by this crate.

use std::sync::Arc;

use futures::try_join;
use thiserror::Error;
use tracing::info;

use super::ids::ChatRef;
use super::keys::{self, Toggle};
use crate::store::{ConfigStore, StoreError};

pub const FLOOD_LIMIT_MIN: u32 = 2;
pub const FLOOD_LIMIT_MAX: u32 = 20;
pub const FLOOD_LIMIT_DEFAULT: u32 = 6;

pub const FLOOD_WINDOW_MIN: u32 = 3;
pub const FLOOD_WINDOW_MAX: u32 = 60;
pub const FLOOD_WINDOW_DEFAULT: u32 = 10;

/// Resolved settings for one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub welcome_enabled: bool,
    pub antilink_enabled: bool,
    pub lockmedia_enabled: bool,
    pub auto_delete_commands_enabled: bool,
    pub antiflood_enabled: bool,
    pub flood_window_secs: u32,
    pub flood_limit: u32,
    pub rules_text: Option<String>,
    pub welcome_template: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            welcome_enabled: Toggle::Welcome.default_value(),
            antilink_enabled: Toggle::Antilink.default_value(),
            lockmedia_enabled: Toggle::Lockmedia.default_value(),
            auto_delete_commands_enabled: Toggle::AutoDeleteCommands.default_value(),
            antiflood_enabled: Toggle::Antiflood.default_value(),
            flood_window_secs: FLOOD_WINDOW_DEFAULT,
            flood_limit: FLOOD_LIMIT_DEFAULT,
            rules_text: None,
            welcome_template: None,
        }
    }
}

impl ChatConfig {
    pub fn toggle(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Welcome => self.welcome_enabled,
            Toggle::Antilink => self.antilink_enabled,
            Toggle::Lockmedia => self.lockmedia_enabled,
            Toggle::AutoDeleteCommands => self.auto_delete_commands_enabled,
            Toggle::Antiflood => self.antiflood_enabled,
        }
    }
}

/// Rejected `/setflood` arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{0:?} bukan angka")]
    NotANumber(String),

    #[error("limit minimal {FLOOD_LIMIT_MIN}")]
    LimitTooLow,

    #[error("window minimal {FLOOD_WINDOW_MIN} detik")]
    WindowTooShort,
}

/// Validated flood-guard parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodLimits {
    pub limit: u32,
    pub window_secs: u32,
}

impl FloodLimits {
    /// Parse `/setflood <limit> <seconds>` arguments.
    ///
    /// Values under the lower bound are rejected; values over the upper
    /// bound are clamped.
    pub fn parse(limit: &str, window: &str) -> Result<Self, SettingsError> {
        let limit: i64 = limit
            .trim()
            .parse()
            .map_err(|_| SettingsError::NotANumber(limit.to_string()))?;
        let window: i64 = window
            .trim()
            .parse()
            .map_err(|_| SettingsError::NotANumber(window.to_string()))?;

        if limit < i64::from(FLOOD_LIMIT_MIN) {
            return Err(SettingsError::LimitTooLow);
        }
        if window < i64::from(FLOOD_WINDOW_MIN) {
            return Err(SettingsError::WindowTooShort);
        }

        Ok(Self {
            limit: clamp_limit(limit),
            window_secs: clamp_window(window),
        })
    }
}

pub fn clamp_limit(value: i64) -> u32 {
    value.clamp(i64::from(FLOOD_LIMIT_MIN), i64::from(FLOOD_LIMIT_MAX)) as u32
}

pub fn clamp_window(value: i64) -> u32 {
    value.clamp(i64::from(FLOOD_WINDOW_MIN), i64::from(FLOOD_WINDOW_MAX)) as u32
}

/// Settings access for all chats.
#[derive(Clone)]
pub struct ChatSettings {
    store: Arc<dyn ConfigStore>,
}

impl ChatSettings {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Load the full configuration of a chat, applying defaults for
    /// absent keys. Store failures are returned, never defaulted.
    pub async fn load(&self, chat: ChatRef) -> Result<ChatConfig, StoreError> {
        let store = self.store.as_ref();
        let window_key = keys::flood_window(chat);
        let limit_key = keys::flood_limit(chat);
        let rules_key = keys::rules(chat);
        let welcome_key = keys::welcome_text(chat);

        let (welcome, antilink, lockmedia, autodel, antiflood) = try_join!(
            self.get_toggle(chat, Toggle::Welcome),
            self.get_toggle(chat, Toggle::Antilink),
            self.get_toggle(chat, Toggle::Lockmedia),
            self.get_toggle(chat, Toggle::AutoDeleteCommands),
            self.get_toggle(chat, Toggle::Antiflood),
        )?;
        let (window, limit, rules_text, welcome_template) = try_join!(
            store.get_int(&window_key, i64::from(FLOOD_WINDOW_DEFAULT)),
            store.get_int(&limit_key, i64::from(FLOOD_LIMIT_DEFAULT)),
            store.get_text(&rules_key),
            store.get_text(&welcome_key),
        )?;

        Ok(ChatConfig {
            welcome_enabled: welcome,
            antilink_enabled: antilink,
            lockmedia_enabled: lockmedia,
            auto_delete_commands_enabled: autodel,
            antiflood_enabled: antiflood,
            flood_window_secs: clamp_window(window),
            flood_limit: clamp_limit(limit),
            rules_text,
            welcome_template,
        })
    }

    pub async fn get_toggle(&self, chat: ChatRef, toggle: Toggle) -> Result<bool, StoreError> {
        self.store
            .get_bool(&toggle.key(chat), toggle.default_value())
            .await
    }

    pub async fn set_toggle(
        &self,
        chat: ChatRef,
        toggle: Toggle,
        enabled: bool,
    ) -> Result<(), StoreError> {
        self.store.set_bool(&toggle.key(chat), enabled).await?;
        info!("{} {} in chat {}", toggle.label(), on_off(enabled), chat);
        Ok(())
    }

    /// Flip a toggle and return the new value.
    ///
    /// Read-then-write: two concurrent flips of the same toggle may both
    /// read the old value, and the last write wins.
    pub async fn flip_toggle(&self, chat: ChatRef, toggle: Toggle) -> Result<bool, StoreError> {
        let enabled = !self.get_toggle(chat, toggle).await?;
        self.set_toggle(chat, toggle, enabled).await?;
        Ok(enabled)
    }

    pub async fn set_flood(&self, chat: ChatRef, limits: FloodLimits) -> Result<(), StoreError> {
        let limit = clamp_limit(i64::from(limits.limit));
        let window = clamp_window(i64::from(limits.window_secs));
        self.store
            .set_int(&keys::flood_limit(chat), i64::from(limit))
            .await?;
        self.store
            .set_int(&keys::flood_window(chat), i64::from(window))
            .await?;
        info!("Flood limit set to {} per {}s in chat {}", limit, window, chat);
        Ok(())
    }

    pub async fn rules(&self, chat: ChatRef) -> Result<Option<String>, StoreError> {
        self.store.get_text(&keys::rules(chat)).await
    }

    pub async fn set_rules(&self, chat: ChatRef, text: &str) -> Result<(), StoreError> {
        self.store.set_text(&keys::rules(chat), text).await
    }

    pub async fn set_welcome_template(&self, chat: ChatRef, text: &str) -> Result<(), StoreError> {
        self.store.set_text(&keys::welcome_text(chat), text).await
    }
}

pub fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}
