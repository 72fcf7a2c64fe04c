//! Upstream API configuration

use core_config::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.restful-api.dev/objects";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the upstream catalog lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Collection URL, e.g. `https://api.restful-api.dev/objects`
    pub base_url: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl FromEnv for UpstreamConfig {
    /// Reads `UPSTREAM_BASE_URL` and `UPSTREAM_TIMEOUT_SECS`.
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("UPSTREAM_BASE_URL", DEFAULT_BASE_URL)
            .trim()
            .trim_end_matches('/')
            .to_string();

        reqwest::Url::parse(&base_url).map_err(|e| ConfigError::ParseError {
            key: "UPSTREAM_BASE_URL".to_string(),
            details: e.to_string(),
        })?;

        let timeout_secs: u64 = env_parse_or("UPSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "UPSTREAM_TIMEOUT_SECS".to_string(),
                details: "must be greater than 0".to_string(),
            });
        }

        Ok(Self::new(base_url, Duration::from_secs(timeout_secs)))
    }
}
