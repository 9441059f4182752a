//! Canonical identifiers for chats, users and messages.
//!
//! Every comparison between identifiers goes through these newtypes, so an
//! owner configured as the string `"42"` and a sender reported as the
//! number `42` are the same user.

use std::fmt;
use std::str::FromStr;

use teloxide::types::{Chat, ChatId, MessageId, UserId};
use thiserror::Error;

/// A chat, the unit of configuration scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatRef(pub i64);

/// A user identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserRef(pub u64);

/// A message inside a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageRef(pub i32);

/// Kind of chat a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    /// Groups and supergroups are the only chats the moderation checks run in.
    pub fn is_group(self) -> bool {
        matches!(self, Self::Group | Self::Supergroup)
    }
}

impl From<&Chat> for ChatKind {
    fn from(chat: &Chat) -> Self {
        if chat.is_private() {
            Self::Private
        } else if chat.is_supergroup() {
            Self::Supergroup
        } else if chat.is_group() {
            Self::Group
        } else {
            Self::Channel
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid user id: {0:?}")]
pub struct ParseIdError(pub String);

impl FromStr for UserRef {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(UserRef)
            .map_err(|_| ParseIdError(s.to_string()))
    }
}

impl fmt::Display for ChatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ChatId> for ChatRef {
    fn from(id: ChatId) -> Self {
        Self(id.0)
    }
}

impl From<ChatRef> for ChatId {
    fn from(chat: ChatRef) -> Self {
        ChatId(chat.0)
    }
}

impl From<UserId> for UserRef {
    fn from(id: UserId) -> Self {
        Self(id.0)
    }
}

impl From<UserRef> for UserId {
    fn from(user: UserRef) -> Self {
        UserId(user.0)
    }
}

impl From<MessageId> for MessageRef {
    fn from(id: MessageId) -> Self {
        Self(id.0)
    }
}

impl From<MessageRef> for MessageId {
    fn from(message: MessageRef) -> Self {
        MessageId(message.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ref_canonicalizes_text() {
        assert_eq!("42".parse::<UserRef>(), Ok(UserRef(42)));
        assert_eq!(" 42 ".parse::<UserRef>(), Ok(UserRef(42)));
        assert_eq!("+42".parse::<UserRef>(), Ok(UserRef(42)));
        assert_eq!("42".parse::<UserRef>().ok(), Some(UserRef::from(UserId(42))));
    }

    #[test]
    fn test_user_ref_rejects_non_numeric() {
        assert!("@someone".parse::<UserRef>().is_err());
        assert!("".parse::<UserRef>().is_err());
        assert!("-5".parse::<UserRef>().is_err());
    }

    #[test]
    fn test_chat_kind_group_check() {
        assert!(ChatKind::Group.is_group());
        assert!(ChatKind::Supergroup.is_group());
        assert!(!ChatKind::Private.is_group());
        assert!(!ChatKind::Channel.is_group());
    }
}
