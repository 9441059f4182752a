//! Moderation pipeline.
//!
//! Every inbound group message walks the stages below in order. The first
//! stage that finds a violation consumes the message: enforcement is
//! requested and no later stage or command dispatch runs.
//!
//! ```text
//! FloodCheck -> AntilinkCheck -> LockmediaCheck -> Passthrough
//! ```
//!
//! Enforcement is fail-open. Actuator failures are logged and reported in
//! the [`Verdict`], never raised. Store failures are raised: a message is
//! never judged against guessed settings.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::join;
use teloxide::types::Message;
use tracing::{info, warn};

use super::actuator::{ActionOutcome, Actuator};
use super::content::{self, is_link_content, MediaKind};
use super::flood::FloodGuard;
use super::ids::{ChatKind, ChatRef, MessageRef, UserRef};
use super::settings::{ChatConfig, ChatSettings};
use crate::store::StoreError;

/// Mute applied to a flooding user.
pub const FLOOD_MUTE: Duration = Duration::from_secs(60);

/// Transport-free view of an inbound message.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat: ChatRef,
    pub chat_kind: ChatKind,
    pub message: MessageRef,
    pub sender: Option<UserRef>,
    /// Text, or the caption of a media message.
    pub text: Option<String>,
    pub media: Option<MediaKind>,
}

impl InboundMessage {
    pub fn from_telegram(msg: &Message) -> Self {
        Self {
            chat: msg.chat.id.into(),
            chat_kind: ChatKind::from(&msg.chat),
            message: msg.id.into(),
            sender: msg.from.as_ref().map(|user| user.id.into()),
            text: content::text_of(msg).map(str::to_owned),
            media: content::media_kind(msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Flood,
    Link,
    Media(MediaKind),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flood => write!(f, "flood"),
            Self::Link => write!(f, "link"),
            Self::Media(kind) => write!(f, "media ({})", kind.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// All checks cleared; the message goes on to command dispatch.
    Passed(ChatConfig),
    /// A check fired and enforcement was requested.
    Consumed {
        violation: Violation,
        delete: ActionOutcome,
        mute: Option<ActionOutcome>,
    },
}

impl Verdict {
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    FloodCheck,
    AntilinkCheck,
    LockmediaCheck,
    Passthrough,
}

impl Stage {
    fn next(self) -> Self {
        match self {
            Self::FloodCheck => Self::AntilinkCheck,
            Self::AntilinkCheck => Self::LockmediaCheck,
            Self::LockmediaCheck | Self::Passthrough => Self::Passthrough,
        }
    }
}

#[derive(Clone)]
pub struct ModerationPipeline {
    settings: ChatSettings,
    flood: FloodGuard,
    actuator: Arc<dyn Actuator>,
}

impl ModerationPipeline {
    pub fn new(settings: ChatSettings, flood: FloodGuard, actuator: Arc<dyn Actuator>) -> Self {
        Self {
            settings,
            flood,
            actuator,
        }
    }

    /// Evaluate one message. Each message is evaluated exactly once.
    pub async fn process(&self, msg: &InboundMessage) -> Result<Verdict, StoreError> {
        if !msg.chat_kind.is_group() {
            return Ok(Verdict::Passed(ChatConfig::default()));
        }

        let config = self.settings.load(msg.chat).await?;

        let mut stage = Stage::FloodCheck;
        loop {
            let violation = match stage {
                Stage::FloodCheck => self.flood_violation(msg, &config),
                Stage::AntilinkCheck => (config.antilink_enabled
                    && msg.text.as_deref().is_some_and(is_link_content))
                .then_some(Violation::Link),
                Stage::LockmediaCheck => msg
                    .media
                    .filter(|_| config.lockmedia_enabled)
                    .map(Violation::Media),
                Stage::Passthrough => return Ok(Verdict::Passed(config)),
            };

            if let Some(violation) = violation {
                return Ok(self.enforce(msg, violation).await);
            }
            stage = stage.next();
        }
    }

    fn flood_violation(&self, msg: &InboundMessage, config: &ChatConfig) -> Option<Violation> {
        if !config.antiflood_enabled {
            return None;
        }
        let sender = msg.sender?;
        self.flood
            .check(msg.chat, sender, config.flood_window_secs, config.flood_limit)
            .then_some(Violation::Flood)
    }

    async fn enforce(&self, msg: &InboundMessage, violation: Violation) -> Verdict {
        info!(
            "Consumed message {} in chat {} from {:?}: {}",
            msg.message, msg.chat, msg.sender, violation
        );

        let delete = self.actuator.delete_message(msg.chat, msg.message);
        let (delete, mute) = match (violation, msg.sender) {
            (Violation::Flood, Some(user)) => {
                let (delete, mute) = join!(delete, self.actuator.mute(msg.chat, user, FLOOD_MUTE));
                (ActionOutcome::from(delete), Some(ActionOutcome::from(mute)))
            }
            _ => (ActionOutcome::from(delete.await), None),
        };

        if !delete.is_done() {
            warn!("Delete of message {} in chat {}: {}", msg.message, msg.chat, delete);
        }
        if let Some(mute) = mute.as_ref().filter(|mute| !mute.is_done()) {
            warn!("Flood mute in chat {}: {}", msg.chat, mute);
        }

        Verdict::Consumed {
            violation,
            delete,
            mute,
        }
    }
}
