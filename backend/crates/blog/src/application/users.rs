//! User Use Cases
//!
//! List, show, create, update and delete users.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::PasswordCodec;

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::error::{BlogError, BlogResult};

/// Create user input
pub struct CreateUserInput {
    pub name: String,
    pub slug: String,
    pub login: String,
    pub email: String,
    /// Plaintext or already-encoded password
    pub password: String,
}

/// User use cases
pub struct UserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    codec: PasswordCodec,
}

impl<R> UserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, codec: PasswordCodec) -> Self {
        Self { repo, codec }
    }

    pub async fn list(&self) -> BlogResult<Vec<User>> {
        self.repo.list_users().await
    }

    pub async fn get(&self, id: UserId) -> BlogResult<User> {
        self.repo
            .find_user(id)
            .await?
            .ok_or(BlogError::UserNotFound(id))
    }

    pub async fn create(&self, input: CreateUserInput) -> BlogResult<User> {
        if input.login.is_empty() || input.password.is_empty() {
            return Err(BlogError::IncompleteData("User"));
        }

        let slug = if input.slug.is_empty() {
            input.name.clone()
        } else {
            input.slug
        };

        let user = self
            .repo
            .create_user(NewUser {
                name: input.name,
                slug,
                login: input.login,
                email: input.email,
                password: self.codec.encode_if_plain(input.password),
            })
            .await?;

        tracing::info!(user_id = %user.id, login = %user.login, "User created");

        Ok(user)
    }

    pub async fn update(&self, id: UserId, changes: UserChanges) -> BlogResult<User> {
        let mut user = self.get(id).await?;
        user.apply(changes, &self.codec);

        let user = self.repo.update_user(&user).await?;

        tracing::info!(user_id = %user.id, "User updated");

        Ok(user)
    }

    /// Delete a user; `false` when it did not exist
    pub async fn delete(&self, id: UserId) -> BlogResult<bool> {
        let deleted = self.repo.delete_user(id).await?;

        if deleted {
            tracing::info!(user_id = %id, "User deleted");
        }

        Ok(deleted)
    }
}
