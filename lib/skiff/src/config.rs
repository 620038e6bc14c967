//! Fetch layer configuration types.
//!
//! Configuration is explicit: a [`FetchConfig`] is built once and passed
//! at construction time, rather than read from ambient globals at call
//! sites. [`FetchConfig::from_env`] exists as a convenience for
//! binaries.

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Run mode of the embedding application.
///
/// Development mode enables verbose schema-validation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Verbose diagnostics, debug-level request logging.
    Development,
    /// Terse logging, diagnostics suppressed.
    #[default]
    Production,
}

impl RunMode {
    /// Returns `true` in development mode.
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::str::FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(Error::invalid_request(format!("unknown run mode: {other}"))),
        }
    }
}

/// Configuration for the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

/// Configuration for the fetch wrapper.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL all paths are resolved against.
    pub base_url: Url,
    /// Run mode controlling diagnostic verbosity.
    pub mode: RunMode,
    /// Underlying HTTP client configuration.
    pub client: ClientConfig,
}

impl FetchConfig {
    /// Create a configuration with defaults for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::builder(base_url.as_ref()).build()
    }

    /// Create a new configuration builder.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> FetchConfigBuilder {
        FetchConfigBuilder {
            base_url: base_url.into(),
            mode: None,
            timeout: None,
            pool_idle_per_host: None,
            pool_idle_timeout: None,
        }
    }

    /// Read configuration from the environment.
    ///
    /// `SKIFF_BASE_URL` is required; `SKIFF_MODE` (`development` or
    /// `production`) is optional and defaults to production.
    ///
    /// # Errors
    ///
    /// Returns an error if `SKIFF_BASE_URL` is unset or invalid, or if
    /// `SKIFF_MODE` names an unknown mode.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SKIFF_BASE_URL")
            .map_err(|_| Error::invalid_request("SKIFF_BASE_URL is not set"))?;
        let mut builder = Self::builder(base_url);
        if let Ok(mode) = std::env::var("SKIFF_MODE") {
            builder = builder.mode(mode.parse()?);
        }
        builder.build()
    }
}

/// Builder for [`FetchConfig`].
#[derive(Debug, Clone)]
pub struct FetchConfigBuilder {
    base_url: String,
    mode: Option<RunMode>,
    timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl FetchConfigBuilder {
    /// Set the run mode.
    #[must_use]
    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn build(self) -> Result<FetchConfig> {
        let client_defaults = ClientConfig::default();
        Ok(FetchConfig {
            base_url: Url::parse(&self.base_url).map_err(Error::InvalidUrl)?,
            mode: self.mode.unwrap_or_default(),
            client: ClientConfig {
                timeout: self.timeout.unwrap_or(client_defaults.timeout),
                pool_idle_per_host: self
                    .pool_idle_per_host
                    .unwrap_or(client_defaults.pool_idle_per_host),
                pool_idle_timeout: self
                    .pool_idle_timeout
                    .unwrap_or(client_defaults.pool_idle_timeout),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FetchConfig::new("https://api.example.com").expect("config");
        assert_eq!(config.base_url.as_str(), "https://api.example.com/");
        assert_eq!(config.mode, RunMode::Production);
        assert_eq!(config.client.timeout, Duration::from_secs(30));
        assert_eq!(config.client.pool_idle_per_host, 32);
    }

    #[test]
    fn builder_overrides() {
        let config = FetchConfig::builder("https://api.example.com")
            .mode(RunMode::Development)
            .timeout(Duration::from_secs(5))
            .pool_idle_per_host(8)
            .build()
            .expect("config");

        assert!(config.mode.is_development());
        assert_eq!(config.client.timeout, Duration::from_secs(5));
        assert_eq!(config.client.pool_idle_per_host, 8);
    }

    #[test]
    fn invalid_base_url() {
        let result = FetchConfig::new("not a url");
        assert!(result.is_err());
    }

    #[test]
    fn run_mode_from_str() {
        assert_eq!("development".parse::<RunMode>().expect("mode"), RunMode::Development);
        assert_eq!("PROD".parse::<RunMode>().expect("mode"), RunMode::Production);
        assert!("staging".parse::<RunMode>().is_err());
    }
}
