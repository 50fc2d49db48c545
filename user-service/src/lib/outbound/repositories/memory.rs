use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Backs the service when `storage.backend = "memory"` and drives the HTTP
/// tests. Records live only as long as the process.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: u64,
    users: BTreeMap<UserId, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        state.last_id += 1;
        let user = user.with_id(UserId(state.last_id));
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: String,
        updated_at: DateTime<Utc>,
    ) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.password_hash = password_hash;
        user.updated_at = updated_at;

        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserName;

    fn new_user(name: &str, email: &str) -> NewUser {
        let now = Utc::now();
        NewUser {
            name: UserName::new(name.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository
            .create(new_user("User1", "user1@example.com"))
            .await
            .unwrap();
        let second = repository
            .create(new_user("User2", "user2@example.com"))
            .await
            .unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
        assert_eq!(repository.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(new_user("User1", "user1@example.com"))
            .await
            .unwrap();

        let result = repository
            .create(new_user("Other", "user1@example.com"))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(new_user("User1", "user1@example.com"))
            .await
            .unwrap();

        assert!(repository
            .find_by_email("user1@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(repository
            .find_by_email("USER1@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_password() {
        let repository = InMemoryUserRepository::new();
        let user = repository
            .create(new_user("User1", "user1@example.com"))
            .await
            .unwrap();

        let later = user.updated_at + chrono::Duration::seconds(5);
        let updated = repository
            .update_password(&user.id, "$argon2id$new_hash".to_string(), later)
            .await
            .unwrap();

        assert_eq!(updated.password_hash, "$argon2id$new_hash");
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, user.created_at);

        let missing = repository
            .update_password(&UserId(99), "x".to_string(), later)
            .await;
        assert!(matches!(missing, Err(UserError::NotFound(_))));
    }
}
