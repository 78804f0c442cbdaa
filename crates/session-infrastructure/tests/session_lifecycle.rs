//! End-to-end session flows over the in-memory store

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use session_core::serde_helpers::{int_string, iso_millis};
use session_core::{
    CookieJar, KeyValueStore, MemoryCookieJar, RemoveOutcome, SessionError, SessionManager, SessionOptions,
    StoreError,
};
use session_infrastructure::MemoryStore;
use session_shared::constants::SESSION_COOKIE_NAME;
use tokio::time::Duration;

#[derive(Debug, Serialize)]
struct User {
    id: i64,
    email: String,
    display_name: String,
    password_hash: String,
    #[serde(with = "iso_millis")]
    last_login: DateTime<Utc>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct SessionUser {
    #[serde(with = "int_string")]
    id: i64,
    email: String,
    #[serde(with = "iso_millis")]
    last_login: DateTime<Utc>,
}

fn user(id: i64) -> User {
    User {
        id,
        email: "ana@example.com".into(),
        display_name: "Ana".into(),
        password_hash: "deadbeef".into(),
        last_login: Utc.with_ymd_and_hms(2026, 1, 25, 4, 9, 0).unwrap(),
    }
}

fn manager(store: Arc<MemoryStore>, ttl_seconds: i64) -> SessionManager<MemoryStore> {
    SessionManager::new(
        store,
        SessionOptions {
            fields: vec!["id".into(), "email".into(), "last_login".into()],
            ttl_seconds,
            secure_cookies: false,
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_create_then_read_returns_configured_fields() {
    let store = Arc::new(MemoryStore::new());
    let sessions = manager(store.clone(), 60);
    let jar = MemoryCookieJar::new();

    sessions.create(&user(42), &jar).await.unwrap();
    let data = sessions.read(&jar).await.unwrap().expect("session should exist");

    assert_eq!(data.len(), 3);
    assert!(!data.contains("display_name"));
    assert!(!data.contains("password_hash"));
    assert_eq!(data.get_str("last_login"), Some("2026-01-25T04:09:00.000Z"));
    assert_eq!(
        data.deserialize::<SessionUser>().unwrap(),
        SessionUser {
            id: 42,
            email: "ana@example.com".into(),
            last_login: Utc.with_ymd_and_hms(2026, 1, 25, 4, 9, 0).unwrap(),
        }
    );
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_wide_integer_id_survives_round_trip() {
    let sessions = manager(Arc::new(MemoryStore::new()), 60);
    let jar = MemoryCookieJar::new();

    sessions.create(&user(i64::MAX), &jar).await.unwrap();
    let data = sessions.read(&jar).await.unwrap().unwrap();

    assert_eq!(data.get_i64("id"), Some(9223372036854775807));
    assert_eq!(data.deserialize::<SessionUser>().unwrap().id, i64::MAX);
}

#[tokio::test]
async fn test_each_create_mints_a_new_identifier() {
    let store = Arc::new(MemoryStore::new());
    let sessions = manager(store.clone(), 60);
    let first = MemoryCookieJar::new();
    let second = MemoryCookieJar::new();

    sessions.create(&user(1), &first).await.unwrap();
    sessions.create(&user(1), &second).await.unwrap();

    let first_id = first.get(SESSION_COOKIE_NAME).unwrap();
    let second_id = second.get(SESSION_COOKIE_NAME).unwrap();
    assert_ne!(first_id, second_id);
    assert_eq!(first_id.len(), 1024);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_update_changes_payload_but_not_identifier() {
    let sessions = manager(Arc::new(MemoryStore::new()), 60);
    let jar = MemoryCookieJar::new();
    sessions.create(&user(7), &jar).await.unwrap();
    let before = jar.get(SESSION_COOKIE_NAME).unwrap();

    let mut changed = user(7);
    changed.email = "ana@new.example.com".into();
    sessions.update(&changed, &jar).await.unwrap();

    assert_eq!(jar.get(SESSION_COOKIE_NAME).unwrap(), before);
    let data = sessions.read(&jar).await.unwrap().unwrap();
    assert_eq!(data.get_str("email"), Some("ana@new.example.com"));
}

#[tokio::test]
async fn test_update_without_session_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let sessions = manager(store.clone(), 60);
    let jar = MemoryCookieJar::new();

    sessions.update(&user(7), &jar).await.unwrap();

    assert!(store.is_empty());
    assert!(jar.get(SESSION_COOKIE_NAME).is_none());
}

#[tokio::test]
async fn test_remove_then_read_is_absent() {
    let store = Arc::new(MemoryStore::new());
    let sessions = manager(store.clone(), 60);
    let jar = MemoryCookieJar::new();
    sessions.create(&user(3), &jar).await.unwrap();
    let session_id = jar.get(SESSION_COOKIE_NAME).unwrap();

    assert_eq!(sessions.remove(&jar).await.unwrap(), RemoveOutcome::Removed);
    assert!(sessions.read(&jar).await.unwrap().is_none());
    assert!(store.get(&format!("session:{}", session_id)).await.unwrap().is_none());

    assert_eq!(sessions.remove(&jar).await.unwrap(), RemoveOutcome::NoActiveSession);
}

#[tokio::test]
async fn test_dangling_cookie_reads_as_absent() {
    let store = Arc::new(MemoryStore::new());
    let sessions = manager(store.clone(), 60);
    let jar = MemoryCookieJar::new();
    sessions.create(&user(3), &jar).await.unwrap();
    let session_id = jar.get(SESSION_COOKIE_NAME).unwrap();

    store.del(&format!("session:{}", session_id)).await.unwrap();
    assert!(sessions.read(&jar).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_session_expires_after_ttl() {
    let sessions = manager(Arc::new(MemoryStore::new()), 2);
    let jar = MemoryCookieJar::new();

    sessions.create(&user(9), &jar).await.unwrap();
    tokio::time::advance(Duration::from_secs(3)).await;

    assert!(sessions.read(&jar).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_update_refreshes_ttl() {
    let sessions = manager(Arc::new(MemoryStore::new()), 2);
    let jar = MemoryCookieJar::new();

    sessions.create(&user(9), &jar).await.unwrap();
    tokio::time::advance(Duration::from_millis(1500)).await;
    sessions.update(&user(9), &jar).await.unwrap();
    tokio::time::advance(Duration::from_millis(1500)).await;

    assert!(sessions.read(&jar).await.unwrap().is_some());
}

#[tokio::test]
async fn test_oversized_ttl_is_a_store_error() {
    let store = Arc::new(MemoryStore::new());
    let sessions = manager(store.clone(), i64::MAX);
    let jar = MemoryCookieJar::new();

    let result = sessions.create(&user(1), &jar).await;

    assert!(matches!(result, Err(SessionError::Store(StoreError::Command(_)))));
    assert!(jar.get(SESSION_COOKIE_NAME).is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_missing_id_field_fails_construction() {
    let result = SessionManager::new(
        Arc::new(MemoryStore::new()),
        SessionOptions {
            fields: vec!["email".into()],
            ttl_seconds: 60,
            secure_cookies: false,
        },
    );
    assert!(matches!(result, Err(SessionError::MissingIdField)));
}
