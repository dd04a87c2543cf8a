//! Principal Entity
//!
//! The authenticated identity attached to a request once the
//! authorization gate has accepted its bearer token.

use kernel::id::UserId;
use serde::Serialize;

use crate::domain::value_object::subject::AuthorizationSubject;

/// Authenticated user for the current request
///
/// Only ever constructed from a fully validated token whose subject still
/// resolves to a stored user with the same login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: UserId,
    pub login: String,
}

impl Principal {
    pub fn new(id: UserId, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
        }
    }

    /// Claim payload carried in the token's `sub`
    pub fn subject(&self) -> AuthorizationSubject {
        AuthorizationSubject {
            id: self.id,
            login: self.login.clone(),
        }
    }
}
