//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! The `Display` strings name the exact failed check and are meant for logs.
//! Clients only ever see [`AuthError::public_message`], which collapses login
//! failures and token failures into one description each.

use std::borrow::Cow;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Public description for a rejected login
pub const LOGIN_FAILED: &str = "User Login: Login failed!";

/// Public description for a login request without a login name
pub const LOGIN_INCOMPLETE: &str = "User Login: Login Data is incomplete!";

/// Public description for any rejected bearer token
pub const TOKEN_INVALID: &str = "Authorization failed: token is invalid";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login request carried no login name
    #[error("Login data is incomplete")]
    MissingCredentials,

    /// No user with the given login
    #[error("Unknown login")]
    UnknownLogin,

    /// Password does not match the stored credential
    #[error("Password mismatch")]
    PasswordMismatch,

    /// No Authorization header
    #[error("Missing authorization token")]
    MissingToken,

    /// Not a `Bearer <token>` header, or the token does not parse
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Signature does not verify with the configured key
    #[error("Token signature is invalid")]
    SignatureInvalid,

    /// Header names an algorithm outside the HMAC family
    #[error("Token algorithm is not accepted: {0}")]
    AlgorithmMismatch(String),

    /// `now >= exp`
    #[error("Token expired")]
    TokenExpired,

    /// Token subject refers to a user that no longer exists
    #[error("Token principal not found")]
    PrincipalNotFound,

    /// Stored login differs from the token's login
    #[error("Token principal login mismatch")]
    PrincipalMismatch,

    /// Handler asked for a principal on a route the gate did not run on
    #[error("Principal requested on an ungated route")]
    PrincipalUnavailable,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials => ErrorKind::UnprocessableEntity,
            AuthError::UnknownLogin
            | AuthError::PasswordMismatch
            | AuthError::MissingToken
            | AuthError::MalformedToken(_)
            | AuthError::SignatureInvalid
            | AuthError::AlgorithmMismatch(_)
            | AuthError::TokenExpired
            | AuthError::PrincipalNotFound
            | AuthError::PrincipalMismatch => ErrorKind::Unauthorized,
            AuthError::PrincipalUnavailable | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether this error came out of token validation
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::MalformedToken(_)
                | AuthError::SignatureInvalid
                | AuthError::AlgorithmMismatch(_)
                | AuthError::TokenExpired
                | AuthError::PrincipalNotFound
                | AuthError::PrincipalMismatch
        )
    }

    /// Description shown to clients
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => LOGIN_INCOMPLETE,
            AuthError::UnknownLogin | AuthError::PasswordMismatch => LOGIN_FAILED,
            e if e.is_token_rejection() => TOKEN_INVALID,
            AuthError::PrincipalUnavailable => "Authorization failed: principal unavailable",
            AuthError::Database(_) => "Database error",
            _ => "Internal error",
        }
    }

    /// Convert to the blog error envelope for `page`, logging the cause
    pub fn into_app_error(self, project: &str, page: impl Into<Cow<'static, str>>) -> AppError {
        self.log();
        AppError::new(self.kind(), self.public_message())
            .with_title(format!("{} - Error", project))
            .with_page(page)
            .with_source(self)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::PrincipalUnavailable => {
                tracing::error!("Principal extractor used without the authorization gate");
            }
            AuthError::UnknownLogin | AuthError::PasswordMismatch => {
                tracing::warn!(reason = %self, "Invalid login attempt");
            }
            AuthError::SignatureInvalid | AuthError::AlgorithmMismatch(_) => {
                tracing::warn!(reason = %self, "Rejected forged token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failures_share_description() {
        assert_eq!(AuthError::UnknownLogin.public_message(), LOGIN_FAILED);
        assert_eq!(AuthError::PasswordMismatch.public_message(), LOGIN_FAILED);
        assert_eq!(
            AuthError::UnknownLogin.kind(),
            AuthError::PasswordMismatch.kind()
        );
    }

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let errors = [
            AuthError::MissingToken,
            AuthError::MalformedToken("segments".into()),
            AuthError::SignatureInvalid,
            AuthError::AlgorithmMismatch("RS256".into()),
            AuthError::TokenExpired,
            AuthError::PrincipalNotFound,
            AuthError::PrincipalMismatch,
        ];

        for err in errors {
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
            assert_eq!(err.public_message(), TOKEN_INVALID);
        }
    }

    #[test]
    fn test_server_side_errors() {
        assert_eq!(
            AuthError::PrincipalUnavailable.kind(),
            ErrorKind::InternalServerError
        );
        assert_eq!(
            AuthError::Internal("boom".into()).kind(),
            ErrorKind::InternalServerError
        );
        assert_eq!(
            AuthError::MissingCredentials.kind(),
            ErrorKind::UnprocessableEntity
        );
    }

    #[test]
    fn test_envelope_does_not_leak_cause() {
        let body = AuthError::TokenExpired
            .into_app_error("Gin Blog API", "users")
            .envelope();

        assert_eq!(body["title"], "Gin Blog API - Error");
        assert_eq!(body["status_code"], 401);
        assert_eq!(body["page"], "users");
        assert_eq!(body["error_message"], "Unauthorized");
        assert_eq!(body["error_description"], TOKEN_INVALID);
    }
}
