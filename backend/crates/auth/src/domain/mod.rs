//! Domain Layer
//!
//! Contains entities, value objects, and the user directory trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{directory_user::DirectoryUser, principal::Principal};
pub use repository::{LocalUserDirectory, UserDirectory};
pub use value_object::{session_claims::SessionClaims, subject::AuthorizationSubject};
