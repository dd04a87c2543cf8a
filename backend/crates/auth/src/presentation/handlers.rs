//! HTTP Handlers

use axum::Json;
use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use chrono::Utc;
use kernel::error::app_error::AppResult;
use platform::password::ClearTextPassword;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{LoginInput, LoginUseCase};
use crate::domain::repository::UserDirectory;
use crate::presentation::dto::{LoginRequest, LoginSuccess};

/// Page name reported by the login endpoint
pub const LOGIN_PAGE: &str = "login";

/// Shared state for the login handler
#[derive(Clone)]
pub struct AuthAppState<U>
where
    U: UserDirectory + Clone + Send + Sync + 'static,
{
    pub directory: Arc<U>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
///
/// Reads JSON when the content type mentions `application/json`, multipart
/// or url-encoded form fields otherwise. Unreadable bodies count as missing
/// credentials.
pub async fn login<U>(
    State(state): State<AuthAppState<U>>,
    req: Request,
) -> AppResult<Json<LoginSuccess>>
where
    U: UserDirectory + Clone + Send + Sync + 'static,
{
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let parsed = if content_type.contains("application/json") {
        Json::<LoginRequest>::from_request(req, &())
            .await
            .map(|Json(body)| body)
            .ok()
    } else if content_type.starts_with("multipart/form-data") {
        read_multipart(req).await
    } else {
        Form::<LoginRequest>::from_request(req, &())
            .await
            .map(|Form(body)| body)
            .ok()
    };
    let body = parsed.unwrap_or_default();

    let use_case = LoginUseCase::new(state.directory.clone(), state.config.clone());

    let input = LoginInput {
        login: body.login,
        password: ClearTextPassword::new(body.password),
    };

    let issued = use_case
        .execute(input, Utc::now())
        .await
        .map_err(|e| e.into_app_error(&state.config.project, LOGIN_PAGE))?;

    Ok(Json(LoginSuccess {
        title: format!("{} - Success", state.config.project),
        status_code: StatusCode::OK.as_u16(),
        page: LOGIN_PAGE.to_string(),
        message: "OK".to_string(),
        expiry: issued.expiry_rfc3339(),
        token: issued.token,
    }))
}

/// Collect `login` and `password` from a multipart form
async fn read_multipart(req: Request) -> Option<LoginRequest> {
    let mut multipart = Multipart::from_request(req, &()).await.ok()?;
    let mut body = LoginRequest::default();

    while let Some(field) = multipart.next_field().await.ok()? {
        let name = field.name().map(str::to_owned);
        let value = field.text().await.ok()?;

        match name.as_deref() {
            Some("login") => body.login = value,
            Some("password") => body.password = value,
            _ => {}
        }
    }

    Some(body)
}
