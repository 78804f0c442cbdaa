//! # Session Infrastructure
//! 
//! Key-value store adapters and configuration wiring.

pub mod cache;

use std::sync::Arc;

use session_core::{PayloadFields, SessionError, SessionManager, SessionOptions};
use session_shared::config::{AppConfig, StoreBackend};
use tracing::{info, warn};

pub use cache::{MemoryStore, RedisStore, RestStore, StoreClient};

/// Builds a session manager from application configuration.
///
/// The payload field list is checked before any store client is created.
pub async fn connect(config: &AppConfig) -> Result<SessionManager<StoreClient>, SessionError> {
    let fields = PayloadFields::new(config.session.payload.iter().cloned())?;

    let store = match config.redis.backend {
        StoreBackend::Rest => StoreClient::Rest(RestStore::new(&config.redis.url, &config.redis.token)?),
        StoreBackend::Native => {
            StoreClient::Native(RedisStore::connect(&config.redis.url, &config.redis.token).await?)
        }
        StoreBackend::Memory => {
            warn!("using in-process session store; sessions are lost on restart");
            StoreClient::Memory(MemoryStore::new())
        }
    };
    info!(backend = ?config.redis.backend, ttl = config.session.ttl, "session store ready");

    SessionManager::new(
        Arc::new(store),
        SessionOptions {
            fields: fields.as_slice().to_vec(),
            ttl_seconds: config.session.ttl,
            secure_cookies: config.secure_cookies(),
        },
    )
}
