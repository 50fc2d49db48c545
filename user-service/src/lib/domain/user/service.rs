use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(command.password.as_str())?;

        let now = Utc::now();
        let user = NewUser {
            name: command.name,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_password(
        &self,
        id: &UserId,
        command: UpdatePasswordCommand,
    ) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(command.password.as_str())?;

        let updated_user = self
            .repository
            .update_password(id, password_hash, Utc::now())
            .await?;
        tracing::info!(user_id = %updated_user.id, "User password updated");

        Ok(updated_user)
    }
}
