//! Argon2 password hashing, run on the blocking pool.

use crate::error::WheelError;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

/// Hash `password` into a salted PHC string.
pub async fn hash_password(password: &str) -> Result<String, WheelError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| WheelError::PasswordHash(e.to_string()))
    })
    .await?
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, WheelError> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        let parsed =
            PasswordHash::new(&stored_hash).map_err(|e| WheelError::PasswordHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await?
}
