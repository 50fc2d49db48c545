use thiserror::Error;

use crate::user::errors::UserError;

/// Failures of a login attempt.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two cases are deliberately merged.
    #[error("wrong credentials")]
    WrongCredentials,

    /// Credentials were correct but no session token could be issued.
    #[error("internal server error")]
    Internal,

    /// Store failure other than a missing user, passed through as-is.
    #[error(transparent)]
    Repository(UserError),
}

/// Failures of the ownership check that follows authentication.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("forbidden")]
    Forbidden,
}
