use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserInput};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned id
    async fn create(&self, input: NewUser) -> UserResult<User>;

    /// Get a user by id
    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Get a user by username
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// List every user
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Apply an update payload to an existing user
    async fn update(&self, id: i64, input: UserInput) -> UserResult<Option<User>>;

    /// Delete a user by id; false if it did not exist
    async fn delete(&self, id: i64) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == input.username) {
            return Err(UserError::DuplicateUsername);
        }
        if users.values().any(|u| u.email == input.email) {
            return Err(UserError::DuplicateEmail);
        }

        let now = chrono::Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by_key(|u| u.id);
        Ok(result)
    }

    async fn update(&self, id: i64, input: UserInput) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        if let Some(ref email) = input.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(UserError::DuplicateEmail);
            }
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        user.apply_update(input);

        tracing::info!(user_id = id, "Updated user");
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .create(new_user("john_doe", "john.doe@example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "john_doe");

        let by_name = repo.get_by_username("john_doe").await.unwrap();
        assert!(by_name.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email_are_distinct_errors() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("john_doe", "john.doe@example.com"))
            .await
            .unwrap();

        let result = repo.create(new_user("john_doe", "other@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername)));

        let result = repo.create(new_user("other", "john.doe@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_rejects_email_taken_by_another_user() {
        let repo = InMemoryUserRepository::new();
        let first = repo
            .create(new_user("john_doe", "john.doe@example.com"))
            .await
            .unwrap();
        repo.create(new_user("jane_smith", "jane.smith@example.com"))
            .await
            .unwrap();

        let result = repo
            .update(
                first.id,
                UserInput {
                    email: Some("jane.smith@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update(42, UserInput::default()).await.unwrap();
        assert!(result.is_none());
    }
}
