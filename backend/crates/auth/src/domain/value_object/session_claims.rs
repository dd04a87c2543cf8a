//! Session Claims Value Object
//!
//! Claim set of a session token. The wire shape is exactly
//! `{iss, sub, iat, exp}` with Unix-second timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::subject::AuthorizationSubject;

/// Claims signed into every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub sub: AuthorizationSubject,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(
        issuer: impl Into<String>,
        subject: AuthorizationSubject,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            iss: issuer.into(),
            sub: subject,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// A token is expired from its `exp` second onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
