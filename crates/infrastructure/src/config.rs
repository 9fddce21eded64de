//! Worker configuration
//!
//! Endpoint and timeout settings for the REST worker. The binary reads
//! overrides from the environment; everything else uses the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "VERIFACE_BASE_URL";
/// Environment variable overriding the per-call timeout in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "VERIFACE_TIMEOUT_MS";

const DEFAULT_BASE_URL: &str = "https://onboarding.example.com/api/v1";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while building a worker from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL does not parse.
    #[error("invalid base URL \"{url}\": {message}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Parser message.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Settings for the REST worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Backend base URL; endpoint paths are appended to it.
    pub base_url: String,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
    /// User-Agent header sent with every call.
    pub user_agent: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: concat!("Veriface/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl WorkerConfig {
    /// Builds a configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Some(timeout) = lookup(TIMEOUT_MS_ENV).and_then(|v| v.parse().ok()) {
            config.timeout_ms = timeout;
        }
        config
    }

    /// Validates the base URL.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidBaseUrl` if the URL does not parse or
    /// is not http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }
        Ok(())
    }

    /// Joins an endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
