use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Signing key must not be empty")]
    MissingSigningKey,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
