//! Session and store errors

use session_security::PasswordError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Missing store credential: {0}")]
    MissingCredential(&'static str),

    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store command failed: {0}")]
    Command(String),

    #[error("Unexpected store response: {0}")]
    Protocol(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session payload fields must include \"id\"")]
    MissingIdField,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid session payload: {0}")]
    InvalidPayload(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}
