//! Key/value store for per-chat settings and counters.
//!
//! The moderation core only talks to [`ConfigStore`]. Two backends exist:
//!
//! - [`MongoStore`] - durable, one `kv` collection with a read-through cache
//! - [`MemoryStore`] - process-local, used when no MongoDB URI is configured
//!
//! Absence of a key yields the caller's default. A failing backend never
//! does: every backend error surfaces as [`StoreError`].

mod memory;
mod mongo;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Backend failure. Both variants mean "store unavailable" to callers.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Key/value store contract.
///
/// Read-modify-write sequences built from `get`/`put` are not transactional;
/// concurrent writers to the same key resolve as last-writer-wins. Use
/// [`ConfigStore::increment`] where a counter must not lose updates.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Raw read. `Ok(None)` means the key is absent.
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;

    /// Raw write (upsert).
    async fn put(&self, key: &str, value: StoredValue) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Atomically add one to an integer counter, saturating at `max`.
    ///
    /// An absent or non-integer value counts as zero. Returns the new value.
    async fn increment(&self, key: &str, max: i64) -> Result<i64, StoreError>;

    async fn get_bool(&self, key: &str, default: bool) -> Result<bool, StoreError> {
        Ok(match self.get(key).await? {
            Some(StoredValue::Bool(value)) => value,
            Some(other) => {
                warn!("Ignoring non-boolean value {:?} at {}", other, key);
                default
            }
            None => default,
        })
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.put(key, StoredValue::Bool(value)).await
    }

    async fn get_int(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        Ok(match self.get(key).await? {
            Some(StoredValue::Int(value)) => value,
            Some(other) => {
                warn!("Ignoring non-integer value {:?} at {}", other, key);
                default
            }
            None => default,
        })
    }

    async fn set_int(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.put(key, StoredValue::Int(value)).await
    }

    async fn get_text(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(match self.get(key).await? {
            Some(StoredValue::Text(value)) => Some(value),
            Some(other) => {
                warn!("Ignoring non-text value {:?} at {}", other, key);
                None
            }
            None => None,
        })
    }

    async fn set_text(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put(key, StoredValue::Text(value.to_string())).await
    }
}
