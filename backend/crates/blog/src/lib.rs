//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Users, articles, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Article reads and the home page are public. User management and article
//! edits require a bearer token issued by the `auth` crate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::BlogConfig;
pub use domain::{Article, ArticleRepository, User, UserRepository};
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::{blog_router, blog_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
