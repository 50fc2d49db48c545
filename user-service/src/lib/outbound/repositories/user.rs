use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id)
            .map_err(|_| UserError::DatabaseError(format!("invalid stored user id {}", row.id)))?;

        Ok(User {
            id: UserId(id),
            name: UserName::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Ids beyond `i64::MAX` cannot exist in a BIGSERIAL column.
fn db_id(id: &UserId) -> Option<i64> {
    i64::try_from(id.0).ok()
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let Some(id) = db_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: String,
        updated_at: DateTime<Utc>,
    ) -> Result<User, UserError> {
        let not_found = || UserError::NotFound(id.to_string());
        let row_id = db_id(id).ok_or_else(not_found)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(row_id)
        .bind(password_hash)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.ok_or_else(not_found)?.try_into()
    }
}
