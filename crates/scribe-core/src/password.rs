//! Password hashing and verification.
//!
//! Uses Argon2id with default parameters and a random per-hash salt,
//! producing PHC-format strings. Verification goes through the argon2
//! verifier, which compares in constant time — there is no early-exit
//! byte comparison anywhere in this module.
//!
//! Plaintext passwords are taken by reference and never logged or stored.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::PasswordError;

/// Hash a plaintext password, returning a PHC-format Argon2id string.
///
/// Each call generates a fresh random salt, so hashing the same password
/// twice yields different strings.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if the hasher rejects its parameters.
pub fn hash(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash {
            reason: e.to_string(),
        })?;
    Ok(hashed.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(false)` on mismatch — a wrong password is an ordinary
/// outcome, not an error.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if the stored hash cannot be parsed.
pub fn verify(plaintext: &str, phc_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(phc_hash).map_err(|e| PasswordError::Hash {
        reason: e.to_string(),
    })?;

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash {
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let h = hash("secret").unwrap();
        assert!(verify("secret", &h).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let h = hash("secret").unwrap();
        assert!(!verify("not-secret", &h).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("secret").unwrap();
        let b = hash("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify("secret", "not-a-phc-string").is_err());
    }
}
