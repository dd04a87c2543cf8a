//! Login Use Case
//!
//! Authenticates a login/password pair and issues a session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token_service::{IssuedToken, TokenService};
use crate::domain::repository::UserDirectory;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub login: String,
    pub password: ClearTextPassword,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserDirectory,
{
    directory: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(directory: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { directory, config }
    }

    pub async fn execute(&self, input: LoginInput, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        if input.login.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .directory
            .find_by_login(&input.login)
            .await?
            .ok_or(AuthError::UnknownLogin)?;

        let codec = self.config.password_codec();
        if !codec.verify(&input.password, &user.password) {
            return Err(AuthError::PasswordMismatch);
        }

        let principal = user.to_principal();
        let issued = TokenService::new(self.directory.clone(), self.config.clone())
            .issue(&principal, now)?;

        tracing::info!(
            user_id = %principal.id,
            expires_at = %issued.expiry_rfc3339(),
            "User logged in"
        );

        Ok(issued)
    }
}
