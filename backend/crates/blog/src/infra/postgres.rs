//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, UserId};
use platform::password::EncodedPassword;
use sqlx::PgPool;

use crate::domain::entity::article::{Article, NewArticle};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{ArticleRepository, UserRepository};
use crate::error::{BlogError, BlogResult};

const USER_COLUMNS: &str = "id, name, slug, login, email, password, created_at, updated_at";
const ARTICLE_COLUMNS: &str = "id, user_id, title, slug, content, created_at, updated_at";

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write failure, turning the `users.login` unique violation into a conflict
fn map_user_write(err: sqlx::Error) -> BlogError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            BlogError::Conflict("User Login")
        }
        _ => BlogError::Database(err),
    }
}

fn bind_id<T>(id: kernel::id::Id<T>) -> Option<i64> {
    id.to_i64()
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgBlogRepository {
    async fn list_users(&self) -> BlogResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn find_user(&self, id: UserId) -> BlogResult<Option<User>> {
        let Some(id) = bind_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_users(&self, ids: &[UserId]) -> BlogResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = ids.iter().filter_map(|id| id.to_i64()).collect();

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ANY($1) ORDER BY id",
            USER_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn create_user(&self, user: NewUser) -> BlogResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (name, slug, login, email, password)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.name)
        .bind(&user.slug)
        .bind(&user.login)
        .bind(&user.email)
        .bind(user.password.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_write)?;

        row.into_user()
    }

    async fn update_user(&self, user: &User) -> BlogResult<User> {
        let id = bind_id(user.id).ok_or(BlogError::UserNotFound(user.id))?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = $2, slug = $3, login = $4, email = $5, password = $6, updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(&user.name)
        .bind(&user.slug)
        .bind(&user.login)
        .bind(&user.email)
        .bind(user.password.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_write)?;

        row.ok_or(BlogError::UserNotFound(user.id))?.into_user()
    }

    async fn delete_user(&self, id: UserId) -> BlogResult<bool> {
        let Some(id) = bind_id(id) else {
            return Ok(false);
        };

        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Article Repository Implementation
// ============================================================================

impl ArticleRepository for PgBlogRepository {
    async fn list_articles(&self, owner: Option<UserId>) -> BlogResult<Vec<Article>> {
        let rows = match owner {
            Some(owner) => {
                let Some(owner) = bind_id(owner) else {
                    return Ok(Vec::new());
                };
                sqlx::query_as::<_, ArticleRow>(&format!(
                    "SELECT {} FROM articles WHERE user_id = $1 ORDER BY id",
                    ARTICLE_COLUMNS
                ))
                .bind(owner)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ArticleRow>(&format!(
                    "SELECT {} FROM articles ORDER BY id",
                    ARTICLE_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(ArticleRow::into_article).collect()
    }

    async fn find_article(&self, id: ArticleId) -> BlogResult<Option<Article>> {
        let Some(id) = bind_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {} FROM articles WHERE id = $1",
            ARTICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ArticleRow::into_article).transpose()
    }

    async fn create_article(&self, article: NewArticle) -> BlogResult<Article> {
        let user_id = bind_id(article.user_id).ok_or(BlogError::OwnerNotFound(article.user_id))?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            INSERT INTO articles (user_id, title, slug, content)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ARTICLE_COLUMNS
        ))
        .bind(user_id)
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.content)
        .fetch_one(&self.pool)
        .await?;

        row.into_article()
    }

    async fn update_article(&self, article: &Article) -> BlogResult<Article> {
        let id = bind_id(article.id).ok_or(BlogError::ArticleNotFound(article.id))?;
        let user_id = bind_id(article.user_id).ok_or(BlogError::UnknownOwner(article.user_id))?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            UPDATE articles
            SET user_id = $2, title = $3, slug = $4, content = $5, updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            ARTICLE_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.content)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(BlogError::ArticleNotFound(article.id))?
            .into_article()
    }

    async fn delete_article(&self, id: ArticleId) -> BlogResult<bool> {
        let Some(id) = bind_id(id) else {
            return Ok(false);
        };

        let deleted = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    slug: String,
    login: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> BlogResult<User> {
        let id = UserId::from_i64(self.id)
            .ok_or_else(|| BlogError::Internal(format!("Invalid user id: {}", self.id)))?;

        Ok(User {
            id,
            name: self.name,
            slug: self.slug,
            login: self.login,
            email: self.email,
            password: EncodedPassword::from_db(self.password),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    user_id: i64,
    title: String,
    slug: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self) -> BlogResult<Article> {
        let id = ArticleId::from_i64(self.id)
            .ok_or_else(|| BlogError::Internal(format!("Invalid article id: {}", self.id)))?;
        let user_id = UserId::from_i64(self.user_id)
            .ok_or_else(|| BlogError::Internal(format!("Invalid owner id: {}", self.user_id)))?;

        Ok(Article {
            id,
            user_id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
