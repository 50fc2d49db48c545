use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and JWT token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    ///
    /// # Errors
    /// * `MissingSigningKey` - The secret is empty
    pub fn new(jwt_secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret)?,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - Session claims to encode in token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or the stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &SessionClaims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
