//! Server Configuration
//!
//! Environment-driven settings, read once at startup.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use blog::BlogConfig;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_MINUTES: u64 = 20;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Everything `main` needs to start serving
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub blog: BlogConfig,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// Outside development builds the signing key must be configured.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let listen_addr = var("BLOG_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("BLOG_LISTEN_ADDR is not a socket address")?;

        let session_minutes = match var("BLOG_SESSION_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("BLOG_SESSION_MINUTES is not a number: {raw}"))?,
            None => DEFAULT_SESSION_MINUTES,
        };
        if session_minutes == 0 {
            bail!("BLOG_SESSION_MINUTES must be positive");
        }

        let project = var("BLOG_PROJECT").unwrap_or_else(|| auth::config::DEFAULT_PROJECT.to_string());

        let mut auth = AuthConfig {
            project: project.clone(),
            session_lifetime: Duration::from_secs(session_minutes * 60),
            ..AuthConfig::development()
        };

        match var("BLOG_ENCRYPTION_KEY") {
            Some(key) => auth.encryption_key = key.into_bytes(),
            None if development => {
                tracing::warn!("BLOG_ENCRYPTION_KEY not set, using the development signing key");
            }
            None => bail!("BLOG_ENCRYPTION_KEY must be set in production"),
        }

        if let Some(salt) = var("BLOG_ENCRYPTION_SALT") {
            auth.encryption_salt = salt;
        }

        let blog = BlogConfig {
            project,
            description: var("BLOG_DESCRIPTION").unwrap_or_default(),
            web_root: BlogConfig::normalize_web_root(&var("BLOG_WEB_ROOT").unwrap_or_default()),
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            max_connections,
            listen_addr,
            frontend_origins,
            auth,
            blog,
        })
    }
}
