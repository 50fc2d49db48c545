use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::Session;

/// Port for the login use case.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange email and password for a session token.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password
    ///
    /// # Returns
    /// The authenticated user together with a freshly signed token
    ///
    /// # Errors
    /// * `WrongCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Internal` - Token could not be issued
    /// * `Repository` - User lookup failed for a reason other than not-found
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthError>;
}
