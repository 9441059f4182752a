//! Cache module - small typed caches on top of Moka.
//!
//! Two hot paths read through a cache:
//! - chat settings, read on every inbound message by the moderation pipeline
//! - chat member status, read on every admin-gated command
//!
//! ## Usage
//!
//! ```rust
//! let cache: TypedCache<String, Option<StoredValue>> =
//!     TypedCache::new("chat_settings", CacheConfig::chat_settings());
//!
//! cache.insert(key.clone(), Some(value));
//! let hit = cache.get(&key);
//! ```

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
