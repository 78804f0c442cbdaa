//! Key-value store trait (port)

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// A value as the store hands it back.
///
/// Some clients decode JSON on the way out; others return the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Text(String),
    Json(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOptions {
    pub expire_seconds: i64,
}

impl SetOptions {
    pub fn expire_in(seconds: i64) -> Self {
        Self { expire_seconds: seconds }
    }
}

/// Minimal store capability the session manager needs.
///
/// `set` replaces any existing value and restarts its expiry. After `del`
/// returns, `get` on the same key yields `None` for this caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;
    async fn set(&self, key: &str, value: &str, options: SetOptions) -> Result<(), StoreError>;
    async fn del(&self, key: &str) -> Result<(), StoreError>;
}
