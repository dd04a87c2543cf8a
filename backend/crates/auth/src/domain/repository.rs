//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::directory_user::DirectoryUser;
use crate::error::AuthResult;

/// Read-only user lookup used by login and token validation
///
/// A missing record is `Ok(None)`; persistence failures are errors.
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Find user by numeric ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<DirectoryUser>>;

    /// Find user by login name (exact match)
    async fn find_by_login(&self, login: &str) -> AuthResult<Option<DirectoryUser>>;
}
