//! Article Use Cases
//!
//! Articles are listed together with their author. An article whose owner
//! no longer exists is still listed, with no author attached.

use std::collections::HashMap;
use std::sync::Arc;

use auth::Principal;
use kernel::id::{ArticleId, UserId};

use crate::domain::entity::article::{Article, ArticleChanges, NewArticle};
use crate::domain::entity::user::User;
use crate::domain::repository::{ArticleRepository, UserRepository};
use crate::error::{BlogError, BlogResult};

/// Article with its resolved owner
#[derive(Debug, Clone)]
pub struct AuthoredArticle {
    pub article: Article,
    pub author: Option<User>,
}

/// Create article input
pub struct CreateArticleInput {
    /// Defaults to the editor
    pub user_id: Option<UserId>,
    pub title: String,
    /// Defaults to the title
    pub slug: String,
    pub content: String,
}

/// Article use cases
pub struct ArticleUseCase<R>
where
    R: UserRepository + ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> ArticleUseCase<R>
where
    R: UserRepository + ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner: Option<UserId>) -> BlogResult<Vec<AuthoredArticle>> {
        let articles = self.repo.list_articles(owner).await?;

        let mut owner_ids: Vec<UserId> = articles.iter().map(|a| a.user_id).collect();
        owner_ids.sort();
        owner_ids.dedup();

        let authors: HashMap<UserId, User> = self
            .repo
            .find_users(&owner_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Ok(articles
            .into_iter()
            .map(|article| AuthoredArticle {
                author: authors.get(&article.user_id).cloned(),
                article,
            })
            .collect())
    }

    pub async fn get(&self, id: ArticleId) -> BlogResult<AuthoredArticle> {
        let article = self
            .repo
            .find_article(id)
            .await?
            .ok_or(BlogError::ArticleNotFound(id))?;

        let author = self.repo.find_user(article.user_id).await?;
        if author.is_none() {
            tracing::debug!(article_id = %id, user_id = %article.user_id, "Article owner missing");
        }

        Ok(AuthoredArticle { article, author })
    }

    pub async fn create(&self, editor: &Principal, input: CreateArticleInput) -> BlogResult<Article> {
        let user_id = input.user_id.unwrap_or(editor.id);

        if self.repo.find_user(user_id).await?.is_none() {
            return Err(BlogError::OwnerNotFound(user_id));
        }

        let slug = if input.slug.is_empty() {
            input.title.clone()
        } else {
            input.slug
        };

        let article = self
            .repo
            .create_article(NewArticle {
                user_id,
                title: input.title,
                slug,
                content: input.content,
            })
            .await?;

        tracing::info!(
            article_id = %article.id,
            user_id = %article.user_id,
            editor = %editor.id,
            "Article created"
        );

        Ok(article)
    }

    pub async fn update(
        &self,
        editor: &Principal,
        id: ArticleId,
        changes: ArticleChanges,
    ) -> BlogResult<Article> {
        let mut article = self
            .repo
            .find_article(id)
            .await?
            .ok_or(BlogError::ArticleNotFound(id))?;

        if let Some(owner) = changes.user_id {
            if self.repo.find_user(owner).await?.is_none() {
                return Err(BlogError::UnknownOwner(owner));
            }
        }

        article.apply(changes);
        let article = self.repo.update_article(&article).await?;

        tracing::info!(article_id = %article.id, editor = %editor.id, "Article updated");

        Ok(article)
    }

    /// Delete an article; `false` when it did not exist
    pub async fn delete(&self, editor: &Principal, id: ArticleId) -> BlogResult<bool> {
        let deleted = self.repo.delete_article(id).await?;

        if deleted {
            tracing::info!(article_id = %id, editor = %editor.id, "Article deleted");
        }

        Ok(deleted)
    }
}
