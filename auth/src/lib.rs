//! Authentication utilities library
//!
//! Provides the authentication primitives used by the user service:
//! - Password hashing (Argon2id)
//! - Session token issuance and validation (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Password@1").unwrap();
//! assert!(hasher.verify("Password@1", &hash));
//! assert!(!hasher.verify("WrongPassword", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, SessionClaims};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = SessionClaims::for_user(1, "User1", "user1@example.com", 24);
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded, claims);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SessionClaims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("Password@1").unwrap();
//!
//! // Login: verify and generate token
//! let claims = SessionClaims::for_user(1, "User1", "user1@example.com", 24);
//! let result = auth.authenticate("Password@1", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.user_id, 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
