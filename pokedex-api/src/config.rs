//! Client configuration.

use serde::{Deserialize, Serialize};

use pokedex_core::constants::{DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS};
use pokedex_core::error::{PokedexError, Result};

/// PokeAPI client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `https://pokeapi.co/api/v2`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: concat!("pokedex/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl ClientConfig {
    /// Creates config for the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads `POKEAPI_BASE_URL` and `POKEAPI_TIMEOUT_SECS`, loading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Self {
            base_url: std::env::var("POKEAPI_BASE_URL").unwrap_or(defaults.base_url),
            timeout_seconds: std::env::var("POKEAPI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            user_agent: defaults.user_agent,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// API root without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Checks that the base URL is an absolute http(s) URL and the timeout is non-zero.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(self.base()).map_err(|e| {
            PokedexError::ConfigError(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PokedexError::ConfigError(format!(
                "base URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(PokedexError::ConfigError("timeout must be at least 1 second".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base(), "https://pokeapi.co/api/v2");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.user_agent.starts_with("pokedex/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8080/api/v2/");
        assert_eq!(config.base(), "http://localhost:8080/api/v2");
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(ClientConfig::new("not a url").validate().is_err());
        assert!(ClientConfig::new("ftp://pokeapi.co").validate().is_err());
        assert!(ClientConfig::default().with_timeout(0).validate().is_err());
    }
}
