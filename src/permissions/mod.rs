//! Chat member status lookups.
//!
//! Implements [`MemberLookup`](crate::moderation::MemberLookup) on top of
//! Telegram's `getChatMember`, with a short-lived cache so that a burst of
//! admin commands costs one API call.
//!
//! ```rust
//! let lookup = TelegramMemberLookup::new(bot.inner().clone());
//! let gate = AdminGate::new(Arc::new(lookup), config.owner_ids.clone());
//!
//! if gate.authorize(Role::Admin, chat, user).await {
//!     // ...
//! }
//! ```

mod checker;

pub use checker::TelegramMemberLookup;
