//! Directory User Entity
//!
//! The slice of a stored user that authentication needs.

use kernel::id::UserId;
use platform::password::EncodedPassword;

use crate::domain::entity::principal::Principal;

/// User record as seen by the login flow and the token validator
#[derive(Debug, Clone)]
pub struct DirectoryUser {
    pub id: UserId,
    pub login: String,
    /// Stored credential, always sentinel-prefixed
    pub password: EncodedPassword,
}

impl DirectoryUser {
    pub fn to_principal(&self) -> Principal {
        Principal::new(self.id, self.login.clone())
    }
}
