//! Client configuration: API endpoint, credentials and HTTP settings

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com/";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every `/v2/...` path is appended to
    pub api_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    pub user_agent: String,
    /// Whole-request timeout applied by the HTTP transport, in milliseconds.
    /// Zero disables it.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: default_user_agent(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ClientConfig {
    /// Read configuration from `REGISTRY_API_URL`, `REGISTRY_API_TOKEN` and
    /// `REGISTRY_API_TIMEOUT`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(api_url) = env::var("REGISTRY_API_URL") {
            config.api_url = api_url;
        }
        config.token = env::var("REGISTRY_API_TOKEN").ok().filter(|t| !t.is_empty());
        if let Ok(timeout) = env::var("REGISTRY_API_TIMEOUT") {
            let secs: u64 = timeout.parse().map_err(|_| {
                RegistryError::Configuration(format!(
                    "REGISTRY_API_TIMEOUT must be a number of seconds, got '{}'",
                    timeout
                ))
            })?;
            config.set_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Parse and check the base URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_url).map_err(|e| {
            RegistryError::Configuration(format!("Invalid API URL '{}': {}", self.api_url, e))
        })?;

        if url.cannot_be_a_base() {
            return Err(RegistryError::Configuration(format!(
                "API URL '{}' cannot carry a path",
                self.api_url
            )));
        }

        Ok(url)
    }

    /// Request timeout, or `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Set the request timeout. A zero duration disables it; anything shorter
    /// than a millisecond rounds up to one.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout_ms = if timeout.is_zero() {
            0
        } else {
            u64::try_from(timeout.as_millis())
                .unwrap_or(u64::MAX)
                .max(1)
        };
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.token, None);
        assert!(config.user_agent.starts_with("container-registry-client/"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        let config = ClientConfig {
            api_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.base_url(),
            Err(RegistryError::Configuration(_))
        ));

        let config = ClientConfig {
            api_url: "mailto:ops@example.com".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.base_url(),
            Err(RegistryError::Configuration(_))
        ));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_url": "http://localhost:8080/", "token": "t0k"}"#)
                .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/");
        assert_eq!(config.token.as_deref(), Some("t0k"));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_set_timeout_keeps_sub_second_precision() {
        let mut config = ClientConfig::default();

        config.set_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

        config.set_timeout(Duration::from_micros(10));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1)));

        config.set_timeout(Duration::from_secs(90));
        assert_eq!(config.timeout_ms, 90_000);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let mut config = ClientConfig::default();
        config.set_timeout(Duration::ZERO);

        assert_eq!(config.timeout_ms, 0);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            token: Some("dop_v1_secret".to_string()),
            ..ClientConfig::default()
        };

        let debug = format!("{:?}", config);
        assert!(!debug.contains("dop_v1_secret"));
        assert!(debug.contains(r#"token: Some("<redacted>")"#));
    }
}
