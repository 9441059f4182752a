//! Warning ledger.
//!
//! One counter per (chat, user). The ledger only counts; deciding to ban on
//! reaching [`WARN_LIMIT`] is up to the caller.

use std::sync::Arc;

use tracing::info;

use super::ids::{ChatRef, UserRef};
use super::keys;
use crate::store::{ConfigStore, StoreError};

/// Count at which the caller bans.
pub const WARN_LIMIT: i64 = 3;

/// Highest value the counter ever holds.
pub const WARN_CAP: i64 = 99;

#[derive(Clone)]
pub struct WarnLedger {
    store: Arc<dyn ConfigStore>,
}

impl WarnLedger {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Add one warning and return the new count (at most [`WARN_CAP`]).
    pub async fn warn(&self, chat: ChatRef, user: UserRef) -> Result<i64, StoreError> {
        let count = self.store.increment(&keys::warn(chat, user), WARN_CAP).await?;
        info!("User {} warned in chat {} ({}/{})", user, chat, count, WARN_LIMIT);
        Ok(count)
    }

    /// Forget all warnings. The next warn starts again at 1.
    pub async fn reset(&self, chat: ChatRef, user: UserRef) -> Result<(), StoreError> {
        self.store.delete(&keys::warn(chat, user)).await?;
        info!("Warnings reset for user {} in chat {}", user, chat);
        Ok(())
    }

    /// Current count, 0 when absent.
    pub async fn get(&self, chat: ChatRef, user: UserRef) -> Result<i64, StoreError> {
        let count = self.store.get_int(&keys::warn(chat, user), 0).await?;
        Ok(count.clamp(0, WARN_CAP))
    }
}

/// True when a count returned by [`WarnLedger::warn`] calls for a ban.
pub fn reaches_ban(count: i64) -> bool {
    count >= WARN_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const CHAT: ChatRef = ChatRef(-42);
    const USER: UserRef = UserRef(1001);

    fn ledger() -> WarnLedger {
        WarnLedger::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_three_warns_escalate() {
        let ledger = ledger();
        let counts = [
            ledger.warn(CHAT, USER).await.unwrap(),
            ledger.warn(CHAT, USER).await.unwrap(),
            ledger.warn(CHAT, USER).await.unwrap(),
        ];
        assert_eq!(counts, [1, 2, 3]);
        assert!(!reaches_ban(counts[1]));
        assert!(reaches_ban(counts[2]));
    }

    #[tokio::test]
    async fn test_reset_restarts_at_one() {
        let ledger = ledger();
        ledger.warn(CHAT, USER).await.unwrap();
        ledger.warn(CHAT, USER).await.unwrap();
        ledger.reset(CHAT, USER).await.unwrap();
        assert_eq!(ledger.get(CHAT, USER).await.unwrap(), 0);
        assert_eq!(ledger.warn(CHAT, USER).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_never_exceeds_cap() {
        let ledger = ledger();
        let mut last = 0;
        for _ in 0..150 {
            last = ledger.warn(CHAT, USER).await.unwrap();
            assert!(last <= WARN_CAP);
        }
        assert_eq!(last, WARN_CAP);
        assert_eq!(ledger.get(CHAT, USER).await.unwrap(), WARN_CAP);
    }

    #[tokio::test]
    async fn test_counters_are_per_chat_and_user() {
        let ledger = ledger();
        ledger.warn(CHAT, USER).await.unwrap();
        assert_eq!(ledger.get(CHAT, UserRef(1002)).await.unwrap(), 0);
        assert_eq!(ledger.get(ChatRef(-43), USER).await.unwrap(), 0);
    }
}
