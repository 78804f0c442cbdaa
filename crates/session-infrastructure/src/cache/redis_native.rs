//! Native Redis protocol store

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use session_core::{KeyValueStore, SetOptions, StoreError, StoredValue};
use tracing::debug;
use url::Url;

use super::require;

/// Store backed by a multiplexed, auto-reconnecting Redis connection
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// Connects to `url`, authenticating with `token` as the password.
    pub async fn connect(url: &str, token: &str) -> Result<Self, StoreError> {
        require(url, "redis.url")?;
        require(token, "redis.token")?;

        let client = redis::Client::open(with_password(url, token)?.as_str())
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        debug!("redis connection established");
        Ok(Self { connection })
    }
}

fn with_password(url: &str, token: &str) -> Result<Url, StoreError> {
    let mut parsed =
        Url::parse(url).map_err(|e| StoreError::Connection(format!("invalid redis url: {}", e)))?;
    parsed
        .set_password(Some(token))
        .map_err(|_| StoreError::Connection("redis url cannot carry credentials".into()))?;
    Ok(parsed)
}

fn command_error(e: redis::RedisError) -> StoreError {
    if e.is_io_error() {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Command(e.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(command_error)?;
        Ok(value.map(StoredValue::Text))
    }

    async fn set(&self, key: &str, value: &str, options: SetOptions) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(options.expire_seconds)
            .query_async(&mut conn)
            .await
            .map_err(command_error)?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: i64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(command_error)?;
        Ok(())
    }
}
