//! Client configuration types.

use lemur_core::{LemurError, Result};
use std::time::Duration;

/// Path prefix of the Lemur REST API
pub const API_PREFIX: &str = "/api/1";

/// Default transport deadline for a single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a Lemur server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Lemur host, e.g. `https://lemur.example.com`
    pub host: String,

    /// Deadline applied by the transport to each request
    pub timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the given host with default settings
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("lemur-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Validate the host and return the API base URL (host + `/api/1`)
    pub fn api_base(&self) -> Result<String> {
        let trimmed = self.host.trim().trim_end_matches('/');
        let parsed = url::Url::parse(trimmed)
            .map_err(|e| LemurError::Config(format!("invalid Lemur host '{}': {e}", self.host)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LemurError::Config(format!(
                "Lemur host must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if trimmed.ends_with(API_PREFIX) {
            Ok(trimmed.to_string())
        } else {
            Ok(format!("{trimmed}{API_PREFIX}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_appends_prefix() {
        let config = ClientConfig::new("https://lemur.example.com/");
        assert_eq!(config.api_base().unwrap(), "https://lemur.example.com/api/1");
    }

    #[test]
    fn api_base_keeps_existing_prefix() {
        let config = ClientConfig::new("http://127.0.0.1:8000/api/1");
        assert_eq!(config.api_base().unwrap(), "http://127.0.0.1:8000/api/1");
    }

    #[test]
    fn api_base_rejects_garbage() {
        assert!(matches!(
            ClientConfig::new("lemur.example.com").api_base(),
            Err(LemurError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://lemur.example.com").api_base(),
            Err(LemurError::Config(_))
        ));
    }

    #[test]
    fn default_timeout() {
        let config = ClientConfig::new("https://lemur.example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("lemur-rust/"));
    }
}
