//! Client configuration.
//!
//! Read once at startup; there is no runtime reconfiguration. Precedence:
//! 1. Environment variables (`COORDINATE_API_*`)
//! 2. Default values

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::ApiError;

pub const BASE_URL_ENV: &str = "COORDINATE_API_URL";
pub const TIMEOUT_ENV: &str = "COORDINATE_API_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and authority of the backend, optionally with a path prefix.
    pub base_url: String,
    /// Upper bound on a whole request, connect through body.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from the process environment, falling back to defaults for unset
    /// variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Some(val) = lookup(BASE_URL_ENV) {
            config.base_url = val;
        }
        if let Some(val) = lookup(TIMEOUT_ENV) {
            let secs: u64 = val
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{TIMEOUT_ENV} must be whole seconds, got {val:?}")))?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        debug!(base_url = %config.base_url, timeout = ?config.timeout, "Client configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base URL must use http or https, got {:?}",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::Config(format!(
                "base URL must not carry a query or fragment: {:?}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}
