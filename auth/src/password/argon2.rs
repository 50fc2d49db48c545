use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// Stateless, so a single instance can be shared freely across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated for every call, so hashing the same
    /// password twice produces two different strings that both verify.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Fails closed: a stored hash that cannot be parsed, or that names an
    /// algorithm this hasher does not support, is reported as a mismatch.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True only if the password produced the hash
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
