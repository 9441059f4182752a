//! Process-local store backed by `DashMap`.
//!
//! State lives as long as the process. Used when `MONGODB_URI` is unset and
//! as the store in tests.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{ConfigStore, StoreError, StoredValue};

/// In-memory implementation of [`ConfigStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn increment(&self, key: &str, max: i64) -> Result<i64, StoreError> {
        // The entry guard holds the shard lock for the whole read-modify-write.
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(StoredValue::Int(0));
        let current = match *entry {
            StoredValue::Int(n) => n,
            _ => 0,
        };
        let next = current.saturating_add(1).min(max);
        *entry = StoredValue::Int(next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_apply_only_when_absent() {
        let store = MemoryStore::new();
        assert!(store.get_bool("antilink:1", true).await.unwrap());
        store.set_bool("antilink:1", false).await.unwrap();
        assert!(!store.get_bool("antilink:1", true).await.unwrap());

        assert_eq!(store.get_int("flood_limit:1", 6).await.unwrap(), 6);
        store.set_int("flood_limit:1", 9).await.unwrap();
        assert_eq!(store.get_int("flood_limit:1", 6).await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_wrong_type_reads_as_default() {
        let store = MemoryStore::new();
        store.set_text("antilink:1", "yes").await.unwrap();
        assert!(!store.get_bool("antilink:1", false).await.unwrap());
        assert_eq!(store.get_int("antilink:1", 3).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_text_round_trip_and_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get_text("rules:1").await.unwrap(), None);
        store.set_text("rules:1", "Be nice").await.unwrap();
        assert_eq!(store.get_text("rules:1").await.unwrap().as_deref(), Some("Be nice"));
        store.delete("rules:1").await.unwrap();
        assert_eq!(store.get_text("rules:1").await.unwrap(), None);
        // Deleting twice is fine.
        store.delete("rules:1").await.unwrap();
    }

    #[tokio::test]
    async fn test_increment_saturates() {
        let store = MemoryStore::new();
        assert_eq!(store.increment("warn:1:2", 3).await.unwrap(), 1);
        assert_eq!(store.increment("warn:1:2", 3).await.unwrap(), 2);
        assert_eq!(store.increment("warn:1:2", 3).await.unwrap(), 3);
        assert_eq!(store.increment("warn:1:2", 3).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment("warn:1:2", 99).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(store.get_int("warn:1:2", 0).await.unwrap(), 20);
    }
}
