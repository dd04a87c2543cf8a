//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! `auth` and `blog` crates.

mod config;

use std::sync::Arc;

use auth::{PgUserDirectory, login_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use blog::{PgBlogRepository, blog_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let auth_config = Arc::new(config.auth);
    let blog_config = Arc::new(config.blog);

    let routes = login_router(PgUserDirectory::new(pool.clone()), auth_config.clone()).merge(
        blog_router(
            PgBlogRepository::new(pool.clone()),
            PgUserDirectory::new(pool),
            blog_config.clone(),
            auth_config,
        ),
    );

    let app = match blog_config.nest_path() {
        Some(prefix) => Router::new().nest(&prefix, routes),
        None => routes,
    }
    .layer(TraceLayer::new_for_http())
    .layer(cors);

    // Start server
    tracing::info!(
        addr = %config.listen_addr,
        web_root = %blog_config.web_root,
        "Listening"
    );

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
