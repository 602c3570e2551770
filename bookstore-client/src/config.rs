//! Client configuration

use std::time::Duration;

/// Default API base address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Path of the token refresh endpoint, relative to the base address
pub const REFRESH_PATH: &str = "/auth/refresh-token";

/// Configuration for the HTTP client facade
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address every request path is resolved against
    pub base_url: String,

    /// Request timeout, applied to every call including token refresh
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration with the given base address
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("bookstore-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Build from `BOOKSTORE_API_URL` and `BOOKSTORE_TIMEOUT_SECS`, falling back to defaults
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BOOKSTORE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);

        if let Ok(raw) = std::env::var("BOOKSTORE_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid BOOKSTORE_TIMEOUT_SECS: {}", raw),
            }
        }
        config
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Absolute URL for a path relative to the base address
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("http://shop.test/api/");
        assert_eq!(config.base_url, "http://shop.test/api");
        assert_eq!(config.url("/books"), "http://shop.test/api/books");
        assert_eq!(config.url("books"), "http://shop.test/api/books");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.user_agent.starts_with("bookstore-client/"));
    }
}
