//! # Session Core
//! 
//! Cookie-bound sessions kept in a remote key-value store: ports, the
//! cookie adapter, the payload codec, and the lifecycle manager.

pub mod cookie;
pub mod error;
pub mod payload;
pub mod repositories;
pub mod serde_helpers;
pub mod services;

pub use cookie::{CookieJar, MemoryCookieJar};
pub use error::{SessionError, StoreError};
pub use payload::{PayloadFields, SessionData};
pub use repositories::{KeyValueStore, SetOptions, StoredValue};
pub use services::{RandomSessionId, RemoveOutcome, SessionIdGenerator, SessionManager, SessionOptions};
