//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::crypto::random_bytes;
use platform::password::PasswordCodec;

/// Issuer written into and required from every session token
pub const TOKEN_ISSUER: &str = "Blog";

/// Project name used in response titles
pub const DEFAULT_PROJECT: &str = "Gin Blog API";

/// Development-only signing key
const DEVELOPMENT_KEY: &[u8] = b"gin-blog";

/// Auth application configuration
///
/// Built once at startup and shared by `Arc`; never mutated afterwards.
#[derive(Clone)]
pub struct AuthConfig {
    /// Project name, rendered as `"<project> - Error"` etc.
    pub project: String,
    /// Token issuer (`iss`)
    pub issuer: String,
    /// Symmetric HMAC key for session tokens
    pub encryption_key: Vec<u8>,
    /// Process-wide password salt
    pub encryption_salt: String,
    /// Session token lifetime (20 minutes)
    pub session_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            issuer: TOKEN_ISSUER.to_string(),
            encryption_key: DEVELOPMENT_KEY.to_vec(),
            encryption_salt: "gin-blog".to_string(),
            session_lifetime: Duration::from_secs(20 * 60),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing key
    ///
    /// Tokens issued by a previous process no longer validate.
    pub fn with_random_secret() -> Self {
        Self {
            encryption_key: random_bytes(64),
            ..Default::default()
        }
    }

    /// Create config for development (well-known key)
    pub fn development() -> Self {
        Self::default()
    }

    /// Password codec bound to the configured salt
    pub fn password_codec(&self) -> PasswordCodec {
        PasswordCodec::new(self.encryption_salt.clone())
    }

    /// Get session lifetime in seconds
    pub fn session_lifetime_secs(&self) -> u64 {
        self.session_lifetime.as_secs()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("project", &self.project)
            .field("issuer", &self.issuer)
            .field("encryption_key", &"[REDACTED]")
            .field("encryption_salt", &"[REDACTED]")
            .field("session_lifetime", &self.session_lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.issuer, "Blog");
        assert_eq!(config.project, "Gin Blog API");
        assert_eq!(config.session_lifetime_secs(), 1200);
    }

    #[test]
    fn test_random_secret_differs() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.encryption_key.len(), 64);
        assert_ne!(a.encryption_key, b.encryption_key);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            encryption_key: b"top-secret-key".to_vec(),
            encryption_salt: "secret-salt".to_string(),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-salt"));
        assert!(!debug.contains("116, 111, 112"));
    }
}
