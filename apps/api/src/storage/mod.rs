//! Key-value store that receives the uploaded resume's name and raw text.
//!
//! `MemoryStore` is the default backend; `RedisStore` is used when `REDIS_URL`
//! is configured. Handlers and the upload orchestrator only see
//! `Arc<dyn KeyValueStore>`.

pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use thiserror::Error;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

/// Key holding the uploaded file's display name.
pub const RESUME_FILE_KEY: &str = "parsedResumeFile";
/// Key holding the raw text read from the uploaded file.
pub const RESUME_CONTENT_KEY: &str = "parsedResumeContent";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes every entry or none of them, overwriting existing values.
    async fn set(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;
}
