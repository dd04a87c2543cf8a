//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::{
    article::{Article, ArticleChanges, NewArticle},
    user::{NewUser, User, UserChanges},
};
pub use repository::{ArticleRepository, UserRepository};
