//! Session identifier generation

use rand::RngCore;
use session_shared::constants::SESSION_ID_BYTES;

/// Returns a fresh, hex-encoded session identifier.
///
/// Drawn from the thread-local CSPRNG, which is seeded from the OS. A failing
/// entropy source panics; there is nothing sensible to fall back to.
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
