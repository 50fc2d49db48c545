use std::fmt;

use auth::SessionClaims;

use crate::domain::authentication::errors::AccessError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Email and plaintext password submitted at login. Never stored.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Identity recovered from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

impl AuthenticatedUser {
    /// Allow the request only if it targets the caller's own user record.
    ///
    /// A valid token is not by itself a permission to act on any resource;
    /// this check is applied after authentication, as a separate step.
    ///
    /// # Errors
    /// * `Forbidden` - `target` belongs to another user
    pub fn authorize_owner(&self, target: &UserId) -> Result<(), AccessError> {
        if self.user_id != *target {
            return Err(AccessError::Forbidden);
        }
        Ok(())
    }
}

impl From<SessionClaims> for AuthenticatedUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: UserId(claims.user_id),
            name: claims.name,
            email: claims.email,
        }
    }
}
