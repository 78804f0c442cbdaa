//! In-memory user directory backing the demo login

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;

/// Full user record. Only the configured session fields ever reach the store.
#[derive(Debug, Clone, Serialize)]
pub struct DemoUser {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub salt: String,
    pub password_hash: String,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<HashMap<i64, DemoUser>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: DemoUser) {
        self.users.write().insert(user.id, user);
    }

    pub fn find_by_id(&self, id: i64) -> Option<DemoUser> {
        self.users.read().get(&id).cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<DemoUser> {
        self.users
            .read()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn update_display_name(&self, id: i64, display_name: &str) -> Option<DemoUser> {
        let mut users = self.users.write();
        let user = users.get_mut(&id)?;
        user.display_name = display_name.to_string();
        Some(user.clone())
    }
}
