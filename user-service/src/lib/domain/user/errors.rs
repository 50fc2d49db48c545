use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("invalid user id: {0}")]
    InvalidFormat(String),
}

/// Field-level validation failures for user input.
///
/// Password rules are reported one at a time, in the order they are checked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid user name")]
    InvalidName,

    #[error("invalid user email")]
    InvalidEmail,

    #[error("password must be at least 6 characters long")]
    TooShort,

    #[error("the password must have at least one lowercase character")]
    MissingLowercase,

    #[error("the password must have at least one uppercase character")]
    MissingUppercase,

    #[error("the password must have at least one numeric character")]
    MissingDigit,

    #[error("the password must have at least one special character")]
    MissingSpecialChar,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error(transparent)]
    InvalidUserId(#[from] UserIdError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Domain-level errors
    #[error("user not found: {0}")]
    NotFound(String),

    #[error("email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("database error: {0}")]
    DatabaseError(String),
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Hashing(err.to_string())
    }
}
