//! Redis over HTTPS (Upstash-style REST endpoint)
//!
//! Each command is POSTed as a JSON array of strings; the reply is
//! `{"result": ...}` or `{"error": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use session_core::{KeyValueStore, SetOptions, StoreError, StoredValue};
use tracing::trace;

use super::require;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct RestReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl RestStore {
    pub fn new(url: &str, token: &str) -> Result<Self, StoreError> {
        require(url, "redis.url")?;
        require(token, "redis.token")?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
            token: token.to_string(),
        })
    }

    async fn command(&self, args: &[&str]) -> Result<Value, StoreError> {
        trace!(command = args.first().copied().unwrap_or_default(), "rest store command");
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let status = response.status();
        let reply: RestReply = response
            .json()
            .await
            .map_err(|e| StoreError::Protocol(format!("HTTP {}: {}", status, e)))?;

        if let Some(error) = reply.error {
            return Err(StoreError::Command(error));
        }
        if !status.is_success() {
            return Err(StoreError::Command(format!("HTTP {}", status)));
        }
        Ok(reply.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl KeyValueStore for RestStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        Ok(match self.command(&["GET", key]).await? {
            Value::Null => None,
            Value::String(text) => Some(StoredValue::Text(text)),
            other => Some(StoredValue::Json(other)),
        })
    }

    async fn set(&self, key: &str, value: &str, options: SetOptions) -> Result<(), StoreError> {
        let ttl = options.expire_seconds.to_string();
        self.command(&["SET", key, value, "EX", &ttl]).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        self.command(&["DEL", key]).await?;
        Ok(())
    }
}
