//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::application::AuthoredArticle;
use crate::domain::entity::article::Article;
use crate::domain::entity::user::User;

/// Author shown for articles whose owner no longer exists
pub const UNKNOWN_AUTHOR: &str = "Unknown";

fn rfc3339(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ============================================================================
// Home / Delete envelopes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeSuccess {
    pub title: String,
    pub status_code: u16,
    pub page: String,
    pub message: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSuccess {
    pub title: String,
    pub status_code: u16,
    pub page: String,
    pub message: String,
    pub description: String,
}

// ============================================================================
// Users
// ============================================================================

/// User as returned to clients; the password never leaves the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub login: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
            slug: user.slug,
            login: user.login,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Create or update user request; absent fields are empty
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub name: String,
    pub slug: String,
    pub login: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Articles
// ============================================================================

/// Stored article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.get(),
            user_id: article.user_id.get(),
            title: article.title,
            slug: article.slug,
            content: article.content,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Article with its author's display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayedArticle {
    pub id: u64,
    pub author: String,
    pub author_slug: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub create_time: String,
    pub update_time: String,
}

impl From<AuthoredArticle> for DisplayedArticle {
    fn from(authored: AuthoredArticle) -> Self {
        let AuthoredArticle { article, author } = authored;

        let (author, author_slug) = match author {
            Some(user) => (user.name, user.slug),
            None => (UNKNOWN_AUTHOR.to_string(), String::new()),
        };

        Self {
            id: article.id.get(),
            author,
            author_slug,
            create_time: rfc3339(&article.created_at),
            update_time: rfc3339(&article.updated_at),
            title: article.title,
            slug: article.slug,
            content: article.content,
        }
    }
}

/// Create or update article request; absent fields are empty
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArticleRequest {
    pub user_id: Option<u64>,
    pub title: String,
    pub slug: String,
    pub content: String,
}

/// `GET /articles` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleQuery {
    pub user_id: Option<String>,
}
