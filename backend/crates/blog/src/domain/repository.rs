//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{ArticleId, UserId};

use crate::domain::entity::article::{Article, NewArticle};
use crate::domain::entity::user::{NewUser, User};
use crate::error::BlogResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// List all users ordered by ID
    async fn list_users(&self) -> BlogResult<Vec<User>>;

    /// Find user by ID
    async fn find_user(&self, id: UserId) -> BlogResult<Option<User>>;

    /// Find several users at once; unknown IDs are skipped
    async fn find_users(&self, ids: &[UserId]) -> BlogResult<Vec<User>>;

    /// Create a new user
    async fn create_user(&self, user: NewUser) -> BlogResult<User>;

    /// Persist all fields of an existing user
    async fn update_user(&self, user: &User) -> BlogResult<User>;

    /// Delete a user; `false` when it did not exist
    async fn delete_user(&self, id: UserId) -> BlogResult<bool>;
}

/// Article repository trait
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    /// List articles ordered by ID, optionally only those of one user
    async fn list_articles(&self, owner: Option<UserId>) -> BlogResult<Vec<Article>>;

    /// Find article by ID
    async fn find_article(&self, id: ArticleId) -> BlogResult<Option<Article>>;

    /// Create a new article
    async fn create_article(&self, article: NewArticle) -> BlogResult<Article>;

    /// Persist all fields of an existing article
    async fn update_article(&self, article: &Article) -> BlogResult<Article>;

    /// Delete an article; `false` when it did not exist
    async fn delete_article(&self, id: ArticleId) -> BlogResult<bool>;
}
