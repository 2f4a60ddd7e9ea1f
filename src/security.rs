use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::RngCore;

use crate::constants::SESSION_TOKEN_BYTES;

/// Generate a new password hash using argon2 with a random salt.
pub fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("failed to hash password");

    hash.to_string()
}

/// Verify a password against a stored argon2 PHC-string hash.
///
/// An unparseable hash is treated as a verification failure rather than a
/// fault, so corrupt rows cannot be logged into.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    let hash = match PasswordHash::new(stored_hash) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!("failed to parse password hash: {}", err);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &hash)
        .is_ok()
}

/// Generate an opaque session token: 32 random bytes, hex-encoded.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
