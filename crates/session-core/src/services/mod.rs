//! Domain services

pub mod id_generator;
pub mod session_service;

pub use id_generator::{RandomSessionId, SessionIdGenerator};
pub use session_service::{RemoveOutcome, SessionManager, SessionOptions};

#[cfg(test)]
pub use id_generator::MockSessionIdGenerator;
