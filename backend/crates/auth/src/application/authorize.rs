//! Authorization Gate
//!
//! Resolves the principal behind an `Authorization: Bearer <token>` header.

use std::sync::Arc;

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserDirectory;
use crate::error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the last `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let value = headers
        .get_all(header::AUTHORIZATION)
        .iter()
        .last()
        .ok_or(AuthError::MissingToken)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedToken("non-ascii authorization header".to_string()))?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AuthError::MalformedToken("missing bearer scheme".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedToken("empty bearer token".to_string()));
    }

    Ok(token)
}

/// Authorization gate
pub struct AuthorizationGate<U>
where
    U: UserDirectory,
{
    tokens: TokenService<U>,
}

impl<U> AuthorizationGate<U>
where
    U: UserDirectory,
{
    pub fn new(directory: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            tokens: TokenService::new(directory, config),
        }
    }

    /// Validate the request's bearer token and return its principal
    pub async fn authorize(&self, headers: &HeaderMap, now: DateTime<Utc>) -> AuthResult<Principal> {
        let token = bearer_token(headers)?;
        let principal = self.tokens.validate(token, now).await?;

        tracing::debug!(user_id = %principal.id, "Request authorized");

        Ok(principal)
    }
}
