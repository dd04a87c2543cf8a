//! Application Configuration
//!
//! Configuration for the Blog application layer.

/// Blog application configuration
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Project name, rendered in every response title
    pub project: String,
    /// Home page description
    pub description: String,
    /// Route prefix, always ending in `/`
    pub web_root: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            project: auth::config::DEFAULT_PROJECT.to_string(),
            description: String::new(),
            web_root: "/".to_string(),
        }
    }
}

impl BlogConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self {
            description: "Blog API (development)".to_string(),
            ..Self::default()
        }
    }

    /// Normalize a configured prefix to `/`, `/blog/`, ...
    pub fn normalize_web_root(raw: &str) -> String {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        }
    }

    /// Prefix in the form `Router::nest` expects, `None` for the root
    pub fn nest_path(&self) -> Option<String> {
        let trimmed = self.web_root.trim_matches('/');
        (!trimmed.is_empty()).then(|| format!("/{}", trimmed))
    }

    pub fn error_title(&self) -> String {
        format!("{} - Error", self.project)
    }
}
