//! Password hashing with Argon2
//!
//! Hashes are raw 64-byte Argon2id derivations, hex-encoded, with a
//! caller-stored salt. Derivation runs on tokio's blocking pool so request
//! tasks on the same worker keep moving.

use argon2::Argon2;
use rand::RngCore;
use session_shared::constants::{DERIVED_KEY_BYTES, SALT_BYTES};
use subtle::ConstantTimeEq;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Hashing task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Inputs for [`PasswordService::compare_password`]
#[derive(Debug, Clone, Copy)]
pub struct PasswordCheck<'a> {
    pub password: &'a str,
    pub salt: &'a str,
    pub hashed_password: &'a str,
}

pub struct PasswordService;

impl PasswordService {
    /// 16 random bytes, hex-encoded.
    pub fn generate_salt() -> String {
        let mut bytes = [0u8; SALT_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        normalize(&hex::encode(bytes))
    }

    /// Argon2 needs at least 8 bytes of salt; shorter salts fail with
    /// [`PasswordError::HashError`]. Salts from [`Self::generate_salt`] are 32 bytes.
    pub async fn hash_password(password: &str, salt: &str) -> Result<String, PasswordError> {
        let password = normalize(password);
        let salt = salt.to_owned();
        tokio::task::spawn_blocking(move || derive_hex(&password, &salt)).await?
    }

    /// Recomputes the hash and compares it in constant time.
    ///
    /// A stored hash that is not valid hex never matches.
    pub async fn compare_password(check: PasswordCheck<'_>) -> Result<bool, PasswordError> {
        let computed = Self::hash_password(check.password, check.salt).await?;
        let (Ok(computed), Ok(stored)) = (hex::decode(computed), hex::decode(check.hashed_password)) else {
            return Ok(false);
        };
        // slice ct_eq rejects unequal lengths without looking at the contents
        Ok(computed.ct_eq(&stored).into())
    }
}

fn normalize(input: &str) -> String {
    input.nfc().collect()
}

fn derive_hex(password: &str, salt: &str) -> Result<String, PasswordError> {
    let mut key = [0u8; DERIVED_KEY_BYTES];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut key)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(normalize(&hex::encode(key)))
}
