//! MongoDB-backed store with a read-through cache.
//!
//! Every key is one document in the `kv` collection: `{ _id: key, value }`.
//! All calls are bounded by the configured timeout; a timeout is reported
//! as [`StoreError::Timeout`] and never falls back to defaults.

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, Bson};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, ReplaceOptions, ReturnDocument};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{ConfigStore, StoreError, StoredValue};
use crate::cache::{CacheConfig, TypedCache};

/// Stored document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KvEntry {
    #[serde(rename = "_id")]
    key: String,
    value: Bson,
}

impl KvEntry {
    fn decode(self) -> Option<StoredValue> {
        match self.value {
            Bson::Boolean(v) => Some(StoredValue::Bool(v)),
            Bson::Int32(v) => Some(StoredValue::Int(i64::from(v))),
            Bson::Int64(v) => Some(StoredValue::Int(v)),
            Bson::String(v) => Some(StoredValue::Text(v)),
            Bson::Null => None,
            other => {
                debug!("Unsupported value type at {}: {:?}", self.key, other);
                None
            }
        }
    }
}

fn encode(value: &StoredValue) -> Bson {
    match value {
        StoredValue::Bool(v) => Bson::Boolean(*v),
        StoredValue::Int(v) => Bson::Int64(*v),
        StoredValue::Text(v) => Bson::String(v.clone()),
    }
}

/// MongoDB implementation of [`ConfigStore`].
///
/// The cache also remembers absent keys. It is only coherent within one
/// process; several replicas sharing one database may read values up to the
/// cache TTL old.
pub struct MongoStore {
    collection: Collection<KvEntry>,
    cache: TypedCache<String, Option<StoredValue>>,
    timeout: Duration,
}

impl MongoStore {
    /// Connect to MongoDB and verify the connection with a ping.
    ///
    /// # Errors
    /// Returns error if the URI is invalid or the server does not answer.
    pub async fn connect(uri: &str, db_name: &str, timeout: Duration) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Successfully connected to MongoDB");

        Ok(Self {
            collection: client.database(db_name).collection("kv"),
            cache: TypedCache::new("chat_settings", CacheConfig::chat_settings()),
            timeout,
        })
    }

    /// Run one MongoDB call under the store timeout.
    async fn bounded<T, F>(&self, op: &str, key: &str, call: F) -> Result<T, StoreError>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, call.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("MongoDB {} failed for {}: {}", op, key, e);
                Err(StoreError::Unavailable(e.to_string()))
            }
            Err(_) => {
                error!("MongoDB {} timed out for {} after {:?}", op, key, self.timeout);
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl ConfigStore for MongoStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let cache_key = key.to_string();
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("Settings cache hit for {}", key);
            return Ok(cached);
        }

        let found = self
            .bounded("find", key, self.collection.find_one(doc! { "_id": key }))
            .await?;
        let value = found.and_then(KvEntry::decode);

        self.cache.insert(cache_key, value.clone());
        Ok(value)
    }

    async fn put(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        let entry = KvEntry {
            key: key.to_string(),
            value: encode(&value),
        };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.bounded(
            "replace",
            key,
            self.collection
                .replace_one(doc! { "_id": key }, entry)
                .with_options(options),
        )
        .await?;

        self.cache.insert(key.to_string(), Some(value));
        debug!("Saved {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.bounded("delete", key, self.collection.delete_one(doc! { "_id": key }))
            .await?;

        self.cache.insert(key.to_string(), None);
        debug!("Deleted {}", key);
        Ok(())
    }

    async fn increment(&self, key: &str, max: i64) -> Result<i64, StoreError> {
        // Single pipeline update: value = min((isNumber(value) ? value : 0) + 1, max)
        let update = vec![doc! {
            "$set": {
                "value": {
                    "$min": [
                        { "$add": [
                            { "$cond": [ { "$isNumber": "$value" }, "$value", 0_i64 ] },
                            1_i64
                        ] },
                        max
                    ]
                }
            }
        }];
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .bounded(
                "increment",
                key,
                self.collection
                    .find_one_and_update(doc! { "_id": key }, update)
                    .with_options(options),
            )
            .await?;

        let value = match updated.and_then(KvEntry::decode) {
            Some(StoredValue::Int(n)) => n,
            other => {
                return Err(StoreError::Unavailable(format!(
                    "increment of {key} returned {other:?}"
                )));
            }
        };

        self.cache.insert(key.to_string(), Some(StoredValue::Int(value)));
        Ok(value)
    }
}
