//! Article Entity

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, UserId};

/// Article entity
#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    /// Owning user; may point at a deleted user
    pub user_id: UserId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for an article that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub user_id: UserId,
    pub title: String,
    pub slug: String,
    pub content: String,
}

/// Partial update; empty strings and `None` leave the field unchanged
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub user_id: Option<UserId>,
    pub title: String,
    pub slug: String,
    pub content: String,
}

impl Article {
    pub fn apply(&mut self, changes: ArticleChanges) {
        if let Some(user_id) = changes.user_id {
            self.user_id = user_id;
        }

        if !changes.title.is_empty() {
            self.title = changes.title;
        }

        if !changes.slug.is_empty() {
            self.slug = changes.slug;
        }

        if !changes.content.is_empty() {
            self.content = changes.content;
        }
    }
}
