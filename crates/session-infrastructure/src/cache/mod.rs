//! Key-value store adapters

mod memory;
mod redis_native;
mod rest;

use async_trait::async_trait;
use session_core::{KeyValueStore, SetOptions, StoreError, StoredValue};

pub use memory::MemoryStore;
pub use redis_native::RedisStore;
pub use rest::RestStore;

fn require(value: &str, name: &'static str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        Err(StoreError::MissingCredential(name))
    } else {
        Ok(())
    }
}

/// Store selected by configuration at startup
pub enum StoreClient {
    Rest(RestStore),
    Native(RedisStore),
    Memory(MemoryStore),
}

#[async_trait]
impl KeyValueStore for StoreClient {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        match self {
            StoreClient::Rest(store) => store.get(key).await,
            StoreClient::Native(store) => store.get(key).await,
            StoreClient::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, options: SetOptions) -> Result<(), StoreError> {
        match self {
            StoreClient::Rest(store) => store.set(key, value, options).await,
            StoreClient::Native(store) => store.set(key, value, options).await,
            StoreClient::Memory(store) => store.set(key, value, options).await,
        }
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        match self {
            StoreClient::Rest(store) => store.del(key).await,
            StoreClient::Native(store) => store.del(key).await,
            StoreClient::Memory(store) => store.del(key).await,
        }
    }
}
