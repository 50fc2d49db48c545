use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with validated fields.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// Created user entity, with its store-assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// List every registered user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Replace the password of an existing user.
    ///
    /// Callers are responsible for checking that the requester owns `id`.
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn update_password(
        &self,
        id: &UserId,
        command: UpdatePasswordCommand,
    ) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - Validated user without an id
    ///
    /// # Returns
    /// Created user entity with its assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact (case-sensitive) email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users from storage, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Store a new password hash for a user.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `password_hash` - Already hashed password
    /// * `updated_at` - Mutation timestamp
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password(
        &self,
        id: &UserId,
        password_hash: String,
        updated_at: DateTime<Utc>,
    ) -> Result<User, UserError>;
}
