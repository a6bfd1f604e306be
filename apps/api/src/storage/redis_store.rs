use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::info;

use super::{KeyValueStore, StoreError};

/// Redis-backed store. Opens a multiplexed connection per call, which keeps
/// the struct `Clone` and free of connection state.
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        info!("Redis client initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    /// Single `MSET`, so readers never see a mix of old and new entries.
    async fn set(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.mset::<_, _, ()>(entries).await?;
        Ok(())
    }
}
