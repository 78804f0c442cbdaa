//! Utility functions

/// Shortens a session identifier for log output.
///
/// Identifiers are bearer secrets; only the first eight characters are
/// ever written to logs.
pub fn mask_session_id(id: &str) -> String {
    match id.get(..8) {
        Some(prefix) if id.len() > 8 => format!("{}…", prefix),
        _ => "***".to_string(),
    }
}
