//! PostgreSQL Repository Implementations

use kernel::id::UserId;
use platform::password::EncodedPassword;
use sqlx::PgPool;

use crate::domain::entity::directory_user::DirectoryUser;
use crate::domain::repository::UserDirectory;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user directory over the `users` table
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserDirectory for PgUserDirectory {
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<DirectoryUser>> {
        // IDs beyond BIGINT cannot be stored
        let Some(id) = id.to_i64() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, DirectoryRow>(
            r#"
            SELECT id, login, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_login(&self, login: &str) -> AuthResult<Option<DirectoryUser>> {
        let row = sqlx::query_as::<_, DirectoryRow>(
            r#"
            SELECT id, login, password
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct DirectoryRow {
    id: i64,
    login: String,
    password: String,
}

impl DirectoryRow {
    fn into_user(self) -> AuthResult<DirectoryUser> {
        let id = UserId::from_i64(self.id)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user id: {}", self.id)))?;

        Ok(DirectoryUser {
            id,
            login: self.login,
            password: EncodedPassword::from_db(self.password),
        })
    }
}
