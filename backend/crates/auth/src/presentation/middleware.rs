//! Auth Middleware
//!
//! Bearer-token gate for protected routes and the extractor that hands the
//! resolved principal to handlers.

use axum::extract::{FromRef, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::AuthorizationGate;
use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserDirectory;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState<D>
where
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    pub directory: Arc<D>,
    pub config: Arc<AuthConfig>,
    /// Page name used in the rejection envelope
    pub page: &'static str,
}

impl<D> AuthGateState<D>
where
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    pub fn new(directory: Arc<D>, config: Arc<AuthConfig>, page: &'static str) -> Self {
        Self {
            directory,
            config,
            page,
        }
    }
}

/// Middleware that requires a valid bearer token
///
/// Use with `axum::middleware::from_fn_with_state`. On success the
/// [`Principal`] is stored in the request extensions; on failure the request
/// is answered with 401 and the inner handler never runs.
pub async fn require_authorization<D>(
    State(state): State<AuthGateState<D>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    let gate = AuthorizationGate::new(state.directory.clone(), state.config.clone());

    let principal = match gate.authorize(req.headers(), Utc::now()).await {
        Ok(principal) => principal,
        Err(e) => {
            return Err(e
                .into_app_error(&state.config.project, state.page)
                .into_response());
        }
    };

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Principal of a gated request
///
/// Fails loudly with [`AuthError::PrincipalUnavailable`] on routes the gate
/// does not cover. The rejection carries the usual error envelope, so the
/// router state must expose the [`AuthConfig`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AuthConfig>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthUser(principal.clone()));
        }

        let config = Arc::<AuthConfig>::from_ref(state);
        Err(AuthError::PrincipalUnavailable
            .into_app_error(&config.project, resource_page(parts.uri.path())))
    }
}

/// First path segment, reported as the envelope page
fn resource_page(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("home")
        .to_string()
}
