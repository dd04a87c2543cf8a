//! Application Layer
//!
//! Use cases for users and articles.

pub mod articles;
pub mod config;
pub mod users;

// Re-exports
pub use articles::{ArticleUseCase, AuthoredArticle, CreateArticleInput};
pub use config::BlogConfig;
pub use users::{CreateUserInput, UserUseCase};
