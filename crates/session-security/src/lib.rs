//! # Session Security
//! 
//! Session identifier generation and password hashing helpers.

pub mod password;
pub mod session;

pub use password::{PasswordCheck, PasswordError, PasswordService};
pub use session::generate_session_id;
