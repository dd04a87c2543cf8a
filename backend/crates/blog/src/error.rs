//! Blog Error Types
//!
//! Blog-specific error variants, rendered through `kernel::error::AppError`.

use std::num::ParseIntError;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{ArticleId, UserId};
use thiserror::Error;

use crate::application::config::BlogConfig;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Path or query ID is not a non-negative integer
    #[error("{context}: ID is invalid! Message: {source}")]
    InvalidId {
        context: &'static str,
        #[source]
        source: ParseIntError,
    },

    /// Request body could not be read
    #[error("{context}: Data is invalid! Message: {message}")]
    InvalidPayload {
        context: &'static str,
        message: String,
    },

    /// Required fields missing on create
    #[error("{0}: Data is incomplete!")]
    IncompleteData(&'static str),

    #[error("User (ID: '{0}'): User does not exist")]
    UserNotFound(UserId),

    #[error("Article (ID: '{0}'): Article does not exist")]
    ArticleNotFound(ArticleId),

    /// New article names an owner that does not exist
    #[error("User (ID: '{0}'): User does not exist")]
    OwnerNotFound(UserId),

    /// Article update moves it to an owner that does not exist
    #[error("User ID: User does not exist!")]
    UnknownOwner(UserId),

    /// Unique constraint on a user field
    #[error("{0} is already taken")]
    Conflict(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::InvalidId { .. }
            | BlogError::InvalidPayload { .. }
            | BlogError::IncompleteData(_)
            | BlogError::UnknownOwner(_) => ErrorKind::UnprocessableEntity,
            BlogError::UserNotFound(_)
            | BlogError::ArticleNotFound(_)
            | BlogError::OwnerNotFound(_) => ErrorKind::NotFound,
            BlogError::Conflict(_) => ErrorKind::Conflict,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Description shown to clients
    pub fn public_message(&self) -> String {
        match self {
            BlogError::Database(_) => "Database error".to_string(),
            BlogError::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to the error envelope for `page`, logging the cause
    pub fn into_app_error(self, config: &BlogConfig, page: &'static str) -> AppError {
        self.log();
        AppError::new(self.kind(), self.public_message())
            .with_title(config.error_title())
            .with_page(page)
            .with_source(self)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Blog request rejected");
            }
        }
    }
}
