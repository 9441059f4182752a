//! Telegram implementation of the enforcement port.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use teloxide::prelude::*;
use teloxide::types::{ChatPermissions, MessageId};
use teloxide::RequestError;
use tracing::{debug, warn};

use super::dispatcher::ThrottledBot;
use crate::moderation::{Actuator, ActuatorError, ChatRef, MessageRef, UserRef};
use crate::utils::PERMANENT_MUTE;

/// Telegram accepts at most this many ids per `deleteMessages` call.
const DELETE_BATCH: usize = 100;

/// Rights restored by an unmute.
fn member_permissions() -> ChatPermissions {
    ChatPermissions::empty()
        | ChatPermissions::SEND_MESSAGES
        | ChatPermissions::SEND_AUDIOS
        | ChatPermissions::SEND_DOCUMENTS
        | ChatPermissions::SEND_PHOTOS
        | ChatPermissions::SEND_VIDEOS
        | ChatPermissions::SEND_VIDEO_NOTES
        | ChatPermissions::SEND_VOICE_NOTES
        | ChatPermissions::SEND_POLLS
        | ChatPermissions::SEND_OTHER_MESSAGES
        | ChatPermissions::ADD_WEB_PAGE_PREVIEWS
        | ChatPermissions::INVITE_USERS
}

/// End of a mute starting at `now`.
///
/// Telegram treats a restriction over 366 days as permanent, so anything
/// longer, including lengths chrono cannot represent, becomes 367 days.
fn mute_until(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    let forever = now + TimeDelta::days(367);
    if duration > PERMANENT_MUTE {
        return forever;
    }
    TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(forever)
}

fn map_err(e: RequestError) -> ActuatorError {
    match e {
        RequestError::Api(api) => ActuatorError::Forbidden(api.to_string()),
        other => ActuatorError::Api(other.to_string()),
    }
}

#[derive(Clone)]
pub struct TelegramActuator {
    bot: ThrottledBot,
}

impl TelegramActuator {
    pub fn new(bot: ThrottledBot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Actuator for TelegramActuator {
    async fn delete_message(&self, chat: ChatRef, message: MessageRef) -> Result<(), ActuatorError> {
        self.bot
            .delete_message(ChatId::from(chat), MessageId::from(message))
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn delete_messages(&self, chat: ChatRef, messages: &[MessageRef]) -> usize {
        let chat_id = ChatId::from(chat);
        let mut deleted = 0;

        for batch in messages.chunks(DELETE_BATCH) {
            let ids: Vec<MessageId> = batch.iter().copied().map(MessageId::from).collect();

            match self.bot.delete_messages(chat_id, ids.clone()).await {
                Ok(_) => deleted += ids.len(),
                Err(e) => {
                    // Fails as a whole if any id is too old; retry one by one.
                    debug!("Batch delete in {} failed ({}), deleting individually", chat, e);
                    for id in ids {
                        if self.bot.delete_message(chat_id, id).await.is_ok() {
                            deleted += 1;
                        }
                    }
                }
            }
        }

        deleted
    }

    async fn mute(&self, chat: ChatRef, user: UserRef, duration: Duration) -> Result<(), ActuatorError> {
        let until = mute_until(Utc::now(), duration);
        self.bot
            .restrict_chat_member(ChatId::from(chat), UserId::from(user), ChatPermissions::empty())
            .until_date(until)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn unmute(&self, chat: ChatRef, user: UserRef) -> Result<(), ActuatorError> {
        self.bot
            .restrict_chat_member(ChatId::from(chat), UserId::from(user), member_permissions())
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn ban(&self, chat: ChatRef, user: UserRef) -> Result<(), ActuatorError> {
        self.bot
            .ban_chat_member(ChatId::from(chat), UserId::from(user))
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn kick(&self, chat: ChatRef, user: UserRef) -> Result<(), ActuatorError> {
        let chat_id = ChatId::from(chat);
        let user_id = UserId::from(user);

        self.bot
            .ban_chat_member(chat_id, user_id)
            .await
            .map_err(map_err)?;
        if let Err(e) = self.bot.unban_chat_member(chat_id, user_id).await {
            warn!("Kicked {} from {} but unban failed: {}", user, chat, e);
        }
        Ok(())
    }

    async fn leave_chat(&self, chat: ChatRef) -> Result<(), ActuatorError> {
        self.bot
            .leave_chat(ChatId::from(chat))
            .await
            .map_err(map_err)?;
        Ok(())
    }
}
