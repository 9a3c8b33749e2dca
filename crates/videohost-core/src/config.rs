//! Auth provider configuration.
//!
//! The hosted provider is located by two values: the project URL and its
//! public anon key. Both come from the environment (optionally seeded from a
//! `.env` file by the binary). Supabase-style variable names are accepted as
//! a fallback so an existing project `.env` works unchanged.

use thiserror::Error;

/// Primary environment variable for the provider base URL
pub const AUTH_URL_VAR: &str = "VIDEOHOST_AUTH_URL";

/// Primary environment variable for the provider anon key
pub const AUTH_KEY_VAR: &str = "VIDEOHOST_AUTH_KEY";

const FALLBACK_URL_VAR: &str = "SUPABASE_URL";
const FALLBACK_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration: set {0}")]
    Missing(&'static str),

    #[error("Invalid auth URL '{0}': expected http:// or https://")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub url: String,
    pub anon_key: String,
}

impl AuthConfig {
    /// Build a config from explicit values, validating and normalizing the URL
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ConfigError::Missing(AUTH_URL_VAR));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }

        let anon_key = anon_key.trim();
        if anon_key.is_empty() {
            return Err(ConfigError::Missing(AUTH_KEY_VAR));
        }

        Ok(Self {
            url: url.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup (the environment, in practice)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(AUTH_URL_VAR)
            .or_else(|| lookup(FALLBACK_URL_VAR))
            .ok_or(ConfigError::Missing(AUTH_URL_VAR))?;
        let anon_key = lookup(AUTH_KEY_VAR)
            .or_else(|| lookup(FALLBACK_KEY_VAR))
            .ok_or(ConfigError::Missing(AUTH_KEY_VAR))?;
        Self::new(&url, &anon_key)
    }
}
