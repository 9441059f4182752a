//! Member status lookup with caching.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatMember, ChatMemberKind};
use tracing::debug;

use crate::cache::{CacheConfig, TypedCache};
use crate::moderation::{ChatRef, LookupError, MemberLookup, MemberStatus, UserRef};

/// Cache key for status lookups.
type StatusCacheKey = (i64, u64); // (chat_id, user_id)

impl From<&ChatMember> for MemberStatus {
    fn from(member: &ChatMember) -> Self {
        match &member.kind {
            ChatMemberKind::Owner(_) => Self::Creator,
            ChatMemberKind::Administrator(_) => Self::Administrator,
            ChatMemberKind::Member => Self::Member,
            ChatMemberKind::Restricted(_) => Self::Restricted,
            ChatMemberKind::Left => Self::Left,
            ChatMemberKind::Banned(_) => Self::Banned,
        }
    }
}

/// `getChatMember`-backed [`MemberLookup`].
///
/// Successful lookups are cached (5 minutes, 2 minutes idle). Failures are
/// not cached, so the next request asks Telegram again.
#[derive(Clone)]
pub struct TelegramMemberLookup {
    bot: Bot,
    cache: TypedCache<StatusCacheKey, MemberStatus>,
}

impl TelegramMemberLookup {
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            cache: TypedCache::new("member_status", CacheConfig::admin_status()),
        }
    }
}

#[async_trait]
impl MemberLookup for TelegramMemberLookup {
    async fn status(&self, chat: ChatRef, user: UserRef) -> Result<MemberStatus, LookupError> {
        let cache_key = (chat.0, user.0);

        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("Member cache hit for user {} in chat {}", user, chat);
            return Ok(cached);
        }

        debug!("Member cache miss for user {} in chat {}", user, chat);

        let member = self
            .bot
            .get_chat_member(ChatId::from(chat), UserId::from(user))
            .await
            .map_err(|e| LookupError(e.to_string()))?;
        let status = MemberStatus::from(&member);

        self.cache.insert(cache_key, status);
        Ok(status)
    }

    fn forget(&self, chat: ChatRef, user: UserRef) {
        self.cache.invalidate(&(chat.0, user.0));
        debug!("Invalidated member cache for user {} in chat {}", user, chat);
    }
}
