//! Application-wide constants

/// Name of the cookie that carries the session identifier
pub const SESSION_COOKIE_NAME: &str = "session-id";
/// Namespace prepended to every session key in the store
pub const SESSION_KEY_PREFIX: &str = "session:";
/// Field every configured payload must contain
pub const SESSION_ID_FIELD: &str = "id";
/// Random bytes behind one session identifier (hex-encoded to twice this length)
pub const SESSION_ID_BYTES: usize = 512;
pub const SALT_BYTES: usize = 16;
pub const DERIVED_KEY_BYTES: usize = 64;
pub const DEFAULT_SESSION_TTL: i64 = 604800;
pub const PRODUCTION_ENV: &str = "production";
