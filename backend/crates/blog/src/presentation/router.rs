//! Blog Router

use axum::middleware::from_fn_with_state;
use axum::Router;
use axum::routing::{get, post, put};
use std::sync::Arc;

use auth::middleware::{AuthGateState, require_authorization};
use auth::{AuthConfig, PgUserDirectory, UserDirectory};

use crate::application::config::BlogConfig;
use crate::domain::repository::{ArticleRepository, UserRepository};
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, ARTICLES_PAGE, BlogAppState, USERS_PAGE};

/// Create the blog router with the PostgreSQL implementations
pub fn blog_router(
    repo: PgBlogRepository,
    directory: PgUserDirectory,
    config: Arc<BlogConfig>,
    auth: Arc<AuthConfig>,
) -> Router {
    blog_router_generic(repo, directory, config, auth)
}

/// Create a blog router for any repository and directory implementation
///
/// Home and article reads are public. Every user route and every article
/// mutation sits behind the bearer-token gate.
pub fn blog_router_generic<R, D>(
    repo: R,
    directory: D,
    config: Arc<BlogConfig>,
    auth: Arc<AuthConfig>,
) -> Router
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    let directory = Arc::new(directory);
    let state = BlogAppState {
        repo: Arc::new(repo),
        config,
        auth: auth.clone(),
    };

    let users_gate = AuthGateState::new(directory.clone(), auth.clone(), USERS_PAGE);
    let articles_gate = AuthGateState::new(directory, auth, ARTICLES_PAGE);

    let public = Router::new()
        .route("/", get(handlers::home::<R>))
        .route("/articles", get(handlers::list_articles::<R>))
        .route("/articles/{id}", get(handlers::get_article::<R>));

    let users = Router::new()
        .route(
            "/users",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route_layer(from_fn_with_state(users_gate, require_authorization::<D>));

    let article_edits = Router::new()
        .route("/articles", post(handlers::create_article::<R>))
        .route(
            "/articles/{id}",
            put(handlers::update_article::<R>)
                .delete(handlers::delete_article::<R>),
        )
        .route_layer(from_fn_with_state(articles_gate, require_authorization::<D>));

    public.merge(users).merge(article_edits).with_state(state)
}
