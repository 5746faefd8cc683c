use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserInput};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user, enforcing username and email uniqueness.
    ///
    /// The lookups give the friendly conflict answer; the repository's
    /// constraint mapping stays as the authoritative backstop for
    /// concurrent inserts.
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: UserInput) -> UserResult<User> {
        let draft = input.into_new_user()?;

        if self
            .repository
            .get_by_username(&draft.username)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateUsername);
        }

        if self.repository.get_by_email(&draft.email).await?.is_some() {
            return Err(UserError::DuplicateEmail);
        }

        self.repository.create(draft).await
    }

    /// Get a user by id
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// List every user
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Update a user. The username is immutable; a changed email is
    /// re-checked for uniqueness against other users.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: i64, input: UserInput) -> UserResult<User> {
        input.validate()?;

        if let Some(ref new_email) = input.email {
            if let Some(existing) = self.repository.get_by_email(new_email).await? {
                if existing.id != id {
                    return Err(UserError::DuplicateEmail);
                }
            }
        }

        self.repository
            .update(id, input)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}
