use std::sync::Arc;

use session_core::{SessionError, SessionManager};
use session_infrastructure::StoreClient;

use crate::users::{DemoUser, UserDirectory};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager<StoreClient>>,
    pub users: Arc<UserDirectory>,
}

impl AppState {
    pub fn new(sessions: SessionManager<StoreClient>) -> Self {
        Self {
            sessions: Arc::new(sessions),
            users: Arc::new(UserDirectory::new()),
        }
    }

    /// Registers a login with a freshly salted password hash.
    pub async fn seed_user(
        &self,
        id: i64,
        email: &str,
        display_name: &str,
        role: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        let salt = self.sessions.generate_salt();
        let password_hash = self.sessions.hash_password(password, &salt).await?;
        self.users.insert(DemoUser {
            id,
            email: email.to_string(),
            display_name: display_name.to_string(),
            role: role.to_string(),
            salt,
            password_hash,
        });
        Ok(())
    }
}
