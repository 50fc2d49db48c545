use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::SessionClaims;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::Session;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Login use case: email lookup, password check, token issue.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    session_duration_hours: u32,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password verifier and token signer holding the process key
    /// * `session_duration_hours` - Lifetime of issued tokens
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        session_duration_hours: u32,
    ) -> Self {
        Self {
            repository,
            authenticator,
            session_duration_hours,
        }
    }

    async fn lookup(&self, email: &str) -> Result<User, AuthError> {
        match self.repository.find_by_email(email).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) | Err(UserError::NotFound(_)) => {
                tracing::warn!("Login rejected");
                Err(AuthError::WrongCredentials)
            }
            Err(e) => Err(AuthError::Repository(e)),
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthError> {
        let user = self.lookup(&credentials.email).await?;
        tracing::debug!(user_id = %user.id, "Login email matched");

        let claims = SessionClaims::for_user(
            user.id.0,
            user.name.as_str(),
            user.email.as_str(),
            self.session_duration_hours,
        );

        let result = self
            .authenticator
            .authenticate(&credentials.password, &user.password_hash, &claims)
            .map_err(login_error)?;
        tracing::info!(user_id = %user.id, "Session issued");

        Ok(Session {
            user,
            token: result.access_token,
        })
    }
}

fn login_error(err: AuthenticationError) -> AuthError {
    match err {
        AuthenticationError::InvalidCredentials => {
            tracing::warn!("Login rejected");
            AuthError::WrongCredentials
        }
        AuthenticationError::JwtError(e) => {
            tracing::error!(error = %e, "Session token could not be issued");
            AuthError::Internal
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtError;
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserName;
    use crate::user::ports::mocks::MockTestUserRepository;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET).unwrap())
    }

    fn user1(authenticator: &Authenticator) -> User {
        let now = Utc::now();
        User {
            id: UserId(1),
            name: UserName::new("User1".to_string()).unwrap(),
            email: EmailAddress::new("user1@example.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password("Password@1").unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with_user1() -> (AuthService<MockTestUserRepository>, Arc<Authenticator>) {
        let authenticator = authenticator();
        let stored = user1(&authenticator);

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |email| Ok((email == "user1@example.com").then(|| stored.clone())));

        (
            AuthService::new(Arc::new(repository), Arc::clone(&authenticator), 24),
            authenticator,
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let (service, authenticator) = service_with_user1();

        let session = service
            .login(Credentials::new(
                "user1@example.com".to_string(),
                "Password@1".to_string(),
            ))
            .await
            .unwrap();

        assert!(!session.token.is_empty());
        assert_eq!(session.user.id, UserId(1));

        let claims = authenticator.validate_token(&session.token).unwrap();
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.name, "User1");
        assert_eq!(claims.email, "user1@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _) = service_with_user1();

        let result = service
            .login(Credentials::new(
                "user1@example.com".to_string(),
                "WrongPassword".to_string(),
            ))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::WrongCredentials));
        assert_eq!(err.to_string(), "wrong credentials");
    }

    #[tokio::test]
    async fn test_login_unknown_email_matches_wrong_password() {
        let (service, _) = service_with_user1();

        let unknown = service
            .login(Credentials::new(
                "nobody@example.com".to_string(),
                "Password@1".to_string(),
            ))
            .await
            .unwrap_err();
        let wrong_password = service
            .login(Credentials::new(
                "user1@example.com".to_string(),
                "WrongPassword".to_string(),
            ))
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong_password.to_string());
        assert!(matches!(unknown, AuthError::WrongCredentials));
    }

    #[tokio::test]
    async fn test_login_email_lookup_is_case_sensitive() {
        let (service, _) = service_with_user1();

        let result = service
            .login(Credentials::new(
                "User1@Example.com".to_string(),
                "Password@1".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(AuthError::WrongCredentials)));
    }

    #[tokio::test]
    async fn test_login_corrupt_stored_hash_is_rejected() {
        let authenticator = authenticator();
        let mut stored = user1(&authenticator);
        stored.password_hash = "corrupt".to_string();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator, 24);
        let result = service
            .login(Credentials::new(
                "user1@example.com".to_string(),
                "Password@1".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(AuthError::WrongCredentials)));
    }

    #[tokio::test]
    async fn test_login_repository_error_propagates() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator(), 24);
        let result = service
            .login(Credentials::new(
                "user1@example.com".to_string(),
                "Password@1".to_string(),
            ))
            .await;

        assert!(matches!(
            result,
            Err(AuthError::Repository(UserError::DatabaseError(_)))
        ));
    }

    #[test]
    fn test_token_failure_is_internal_error() {
        let err = login_error(AuthenticationError::JwtError(JwtError::EncodingFailed(
            "boom".to_string(),
        )));

        assert!(matches!(err, AuthError::Internal));
        assert_eq!(err.to_string(), "internal server error");
    }
}
