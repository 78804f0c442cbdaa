//! # Session Shared
//! 
//! Configuration, telemetry, and shared helpers for the session crates.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
