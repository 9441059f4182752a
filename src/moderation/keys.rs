//! Store key scheme.
//!
//! Keys are plain strings with the chat (and user) id interpolated:
//! `antilink:<chat>`, `warn:<chat>:<user>`, ...

use super::ids::{ChatRef, UserRef};

/// Named boolean feature flags stored per chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Welcome,
    Antilink,
    Lockmedia,
    AutoDeleteCommands,
    Antiflood,
}

impl Toggle {
    /// Panel order.
    pub const ALL: [Toggle; 5] = [
        Toggle::Antilink,
        Toggle::Lockmedia,
        Toggle::AutoDeleteCommands,
        Toggle::Antiflood,
        Toggle::Welcome,
    ];

    fn prefix(self) -> &'static str {
        match self {
            Self::Welcome => "welcome_enabled",
            Self::Antilink => "antilink",
            Self::Lockmedia => "lockmedia",
            Self::AutoDeleteCommands => "autodelcmd",
            Self::Antiflood => "antiflood",
        }
    }

    /// Value used when the key is absent.
    pub fn default_value(self) -> bool {
        matches!(self, Self::AutoDeleteCommands | Self::Antiflood)
    }

    pub fn key(self, chat: ChatRef) -> String {
        format!("{}:{}", self.prefix(), chat)
    }

    /// Short stable token for callback data.
    pub fn token(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Antilink => "antilink",
            Self::Lockmedia => "lockmedia",
            Self::AutoDeleteCommands => "autodel",
            Self::Antiflood => "antiflood",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.token() == token)
    }

    /// Human label used in replies and on panel buttons.
    pub fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Antilink => "AntiLink",
            Self::Lockmedia => "LockMedia",
            Self::AutoDeleteCommands => "AutoDelCmd",
            Self::Antiflood => "AntiFlood",
        }
    }
}

pub fn flood_limit(chat: ChatRef) -> String {
    format!("flood_limit:{chat}")
}

pub fn flood_window(chat: ChatRef) -> String {
    format!("flood_window:{chat}")
}

pub fn rules(chat: ChatRef) -> String {
    format!("rules:{chat}")
}

pub fn welcome_text(chat: ChatRef) -> String {
    format!("welcome_text:{chat}")
}

pub fn warn(chat: ChatRef, user: UserRef) -> String {
    format!("warn:{chat}:{user}")
}
