//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod config;
pub mod jws;
pub mod sign_in;
pub mod token_service;

// Re-exports
pub use authorize::{AuthorizationGate, bearer_token};
pub use config::AuthConfig;
pub use sign_in::{LoginInput, LoginUseCase};
pub use token_service::{IssuedToken, TokenService};
