//! Token Service
//!
//! Issues and validates session tokens (compact JWS, HS512).

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

use crate::application::config::AuthConfig;
use crate::application::jws::{self, HmacAlgorithm};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::session_claims::SessionClaims;
use crate::domain::value_object::subject::AuthorizationSubject;
use crate::error::{AuthError, AuthResult};

/// Algorithm used for newly issued tokens
pub const SIGNING_ALGORITHM: HmacAlgorithm = HmacAlgorithm::Hs512;

/// A freshly signed session token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Expiry as RFC 3339 (`2024-05-01T12:20:00Z`)
    pub fn expiry_rfc3339(&self) -> String {
        self.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Token issuing and validation
pub struct TokenService<U>
where
    U: UserDirectory,
{
    directory: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> TokenService<U>
where
    U: UserDirectory,
{
    pub fn new(directory: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { directory, config }
    }

    /// Sign a token for `principal`, valid from `now` for the session lifetime
    pub fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let lifetime = TimeDelta::from_std(self.config.session_lifetime)
            .map_err(|e| AuthError::Internal(format!("Session lifetime out of range: {}", e)))?;
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AuthError::Internal("Session expiry overflows".to_string()))?;

        let claims = SessionClaims::new(
            self.config.issuer.clone(),
            principal.subject(),
            now,
            expires_at,
        );
        let token = jws::encode(SIGNING_ALGORITHM, &self.config.encryption_key, &claims)?;

        Ok(IssuedToken {
            token,
            issued_at: now,
            expires_at,
        })
    }

    /// Verify a token's signature and claims without touching the directory
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> AuthResult<AuthorizationSubject> {
        let claims: SessionClaims = jws::decode(token, &self.config.encryption_key)?;

        if claims.iss != self.config.issuer {
            return Err(AuthError::MalformedToken(format!(
                "unexpected issuer {:?}",
                claims.iss
            )));
        }

        if claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims.sub)
    }

    /// Decode, then confirm the subject still names a stored user
    pub async fn validate(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Principal> {
        let subject = self.decode(token, now)?;

        let user = self
            .directory
            .find_by_id(subject.id)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;

        if user.login != subject.login {
            return Err(AuthError::PrincipalMismatch);
        }

        Ok(user.to_principal())
    }
}
