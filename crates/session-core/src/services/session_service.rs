// ============================================================================
// Session Core - Session Lifecycle Service
// File: crates/session-core/src/services/session_service.rs
// ============================================================================
//! Create, read, update, and remove cookie-bound sessions

use std::sync::Arc;

use serde::Serialize;
use session_security::{PasswordCheck, PasswordService};
use session_shared::constants::SESSION_KEY_PREFIX;
use session_shared::utils::mask_session_id;
use tracing::debug;

use crate::cookie::{self, CookieJar};
use crate::error::SessionError;
use crate::payload::{self, PayloadFields, SessionData};
use crate::repositories::{KeyValueStore, SetOptions};
use crate::services::id_generator::{RandomSessionId, SessionIdGenerator};

/// Construction options for [`SessionManager`]
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// User fields persisted in the session; must include `id`
    pub fields: Vec<String>,
    /// Expiry applied on every write, in seconds
    pub ttl_seconds: i64,
    /// `Secure` attribute of the session cookie
    pub secure_cookies: bool,
}

/// Result of [`SessionManager::remove`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// No session cookie was present; nothing was touched
    NoActiveSession,
}

/// Session facade over a key-value store
pub struct SessionManager<S: KeyValueStore, G: SessionIdGenerator = RandomSessionId> {
    store: Arc<S>,
    ids: G,
    fields: PayloadFields,
    ttl_seconds: i64,
    secure_cookies: bool,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: Arc<S>, options: SessionOptions) -> Result<Self, SessionError> {
        let fields = PayloadFields::new(options.fields)?;
        Ok(Self {
            store,
            ids: RandomSessionId,
            fields,
            ttl_seconds: options.ttl_seconds,
            secure_cookies: options.secure_cookies,
        })
    }
}

impl<S: KeyValueStore, G: SessionIdGenerator> SessionManager<S, G> {
    /// Swaps the identifier source
    pub fn with_id_generator<G2: SessionIdGenerator>(self, ids: G2) -> SessionManager<S, G2> {
        SessionManager {
            store: self.store,
            ids,
            fields: self.fields,
            ttl_seconds: self.ttl_seconds,
            secure_cookies: self.secure_cookies,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn fields(&self) -> &[String] {
        self.fields.as_slice()
    }

    /// Current session payload, or `None` when there is no cookie or the
    /// stored record is gone.
    pub async fn read<J: CookieJar + ?Sized>(&self, cookies: &J) -> Result<Option<SessionData>, SessionError> {
        let Some(session_id) = cookie::get_session_id(cookies) else {
            return Ok(None);
        };

        let Some(stored) = self.store.get(&session_key(&session_id)).await? else {
            debug!(session = %mask_session_id(&session_id), "session record missing or expired");
            return Ok(None);
        };

        let record = payload::decode_record(stored)?;
        Ok(Some(SessionData::from(self.fields.project(record))))
    }

    /// Starts a new session for `user` under a freshly generated identifier.
    pub async fn create<U, J>(&self, user: &U, cookies: &J) -> Result<(), SessionError>
    where
        U: Serialize + Sync + ?Sized,
        J: CookieJar + ?Sized,
    {
        let record = payload::project_user(user, &self.fields)?;
        let session_id = self.ids.generate();
        let encoded = payload::encode_record(record)?;

        self.store
            .set(&session_key(&session_id), &encoded, SetOptions::expire_in(self.ttl_seconds))
            .await?;
        cookie::set_session_cookie(cookies, &session_id, self.ttl_seconds, self.secure_cookies);

        debug!(session = %mask_session_id(&session_id), "session created");
        Ok(())
    }

    /// Rewrites the current session's payload and restarts its expiry.
    ///
    /// Without a session cookie this does nothing; only `create` mints
    /// identifiers.
    pub async fn update<U, J>(&self, user: &U, cookies: &J) -> Result<(), SessionError>
    where
        U: Serialize + Sync + ?Sized,
        J: CookieJar + ?Sized,
    {
        let Some(session_id) = cookie::get_session_id(cookies) else {
            return Ok(());
        };

        let record = payload::project_user(user, &self.fields)?;
        let encoded = payload::encode_record(record)?;
        self.store
            .set(&session_key(&session_id), &encoded, SetOptions::expire_in(self.ttl_seconds))
            .await?;

        debug!(session = %mask_session_id(&session_id), "session updated");
        Ok(())
    }

    /// Deletes the stored record and the cookie.
    ///
    /// The cookie is cleared even when the store delete fails; the store
    /// error is still returned.
    pub async fn remove<J: CookieJar + ?Sized>(&self, cookies: &J) -> Result<RemoveOutcome, SessionError> {
        let Some(session_id) = cookie::get_session_id(cookies) else {
            return Ok(RemoveOutcome::NoActiveSession);
        };

        let deleted = self.store.del(&session_key(&session_id)).await;
        cookie::delete_session_cookie(cookies);
        deleted?;

        debug!(session = %mask_session_id(&session_id), "session removed");
        Ok(RemoveOutcome::Removed)
    }

    pub fn generate_salt(&self) -> String {
        PasswordService::generate_salt()
    }

    pub async fn hash_password(&self, password: &str, salt: &str) -> Result<String, SessionError> {
        Ok(PasswordService::hash_password(password, salt).await?)
    }

    pub async fn compare_password(&self, check: PasswordCheck<'_>) -> Result<bool, SessionError> {
        Ok(PasswordService::compare_password(check).await?)
    }
}

fn session_key(session_id: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, session_id)
}
