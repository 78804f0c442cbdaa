//! Session identifier source

/// Mints identifiers for new sessions
#[cfg_attr(test, mockall::automock)]
pub trait SessionIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Hex-encoded CSPRNG identifiers from `session-security`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSessionId;

impl SessionIdGenerator for RandomSessionId {
    fn generate(&self) -> String {
        session_security::generate_session_id()
    }
}
