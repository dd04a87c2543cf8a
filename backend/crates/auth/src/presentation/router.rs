//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserDirectory;
use crate::infra::postgres::PgUserDirectory;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the login router with the PostgreSQL directory
pub fn login_router(directory: PgUserDirectory, config: Arc<AuthConfig>) -> Router {
    login_router_generic(directory, config)
}

/// Create a login router for any directory implementation
pub fn login_router_generic<U>(directory: U, config: Arc<AuthConfig>) -> Router
where
    U: UserDirectory + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        directory: Arc::new(directory),
        config,
    };

    Router::new()
        .route("/login", post(handlers::login::<U>))
        .with_state(state)
}
