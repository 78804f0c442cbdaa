//! Session cookie adapter

use std::collections::HashMap;

use parking_lot::Mutex;
use session_shared::constants::SESSION_COOKIE_NAME;
use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};

/// Request-scoped cookie access.
///
/// Writes go through `&self` so the jar can be shared by reference with
/// the session manager while a handler still holds it.
pub trait CookieJar: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, cookie: Cookie<'static>);
    fn delete(&self, name: &str);
}

impl CookieJar for Cookies {
    fn get(&self, name: &str) -> Option<String> {
        Cookies::get(self, name).map(|c| c.value().to_string())
    }

    fn set(&self, cookie: Cookie<'static>) {
        self.add(cookie);
    }

    fn delete(&self, name: &str) {
        self.remove(Cookie::build((name.to_owned(), "")).path("/").build());
    }
}

/// In-process jar for tests and non-HTTP callers
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: Mutex<HashMap<String, Cookie<'static>>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full cookie including attributes
    pub fn cookie(&self, name: &str) -> Option<Cookie<'static>> {
        self.cookies.lock().get(name).cloned()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.lock().get(name).map(|c| c.value().to_string())
    }

    fn set(&self, cookie: Cookie<'static>) {
        self.cookies.lock().insert(cookie.name().to_string(), cookie);
    }

    fn delete(&self, name: &str) {
        self.cookies.lock().remove(name);
    }
}

/// Session identifier from the request cookie. An empty value counts as absent.
pub fn get_session_id<J: CookieJar + ?Sized>(jar: &J) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME).filter(|value| !value.is_empty())
}

pub fn set_session_cookie<J: CookieJar + ?Sized>(jar: &J, value: &str, ttl_seconds: i64, secure: bool) {
    jar.set(session_cookie(value.to_owned(), ttl_seconds, secure));
}

pub fn delete_session_cookie<J: CookieJar + ?Sized>(jar: &J) {
    jar.delete(SESSION_COOKIE_NAME);
}

fn session_cookie(value: String, ttl_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .max_age(Duration::seconds(ttl_seconds))
        .build()
}
