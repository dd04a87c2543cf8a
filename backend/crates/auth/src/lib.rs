//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Principal, token claims, user directory trait
//! - `application/` - Login, token service, authorization gate
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Login with login name + password, answered with a session token
//! - Stateless session tokens (compact JWS, HS512) with a fixed lifetime
//! - Bearer-token gate that resolves the principal for protected routes
//!
//! ## Security Model
//! - Passwords stored as salted SHA-512 (see `platform::password`)
//! - Only HMAC algorithms accepted in token headers
//! - Token subject re-checked against the stored login on every request
//! - Clients never learn which check rejected a login or a token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthorizationGate, IssuedToken, TokenService};
pub use domain::{DirectoryUser, Principal, UserDirectory};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserDirectory;
pub use presentation::router::login_router;

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
