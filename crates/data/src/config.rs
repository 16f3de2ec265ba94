//! Backend configuration.

use std::env;
use std::time::Duration;
use tracing::warn;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "OMNIYIELD_BACKEND_URL";
/// Environment variable holding the per-request timeout in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "OMNIYIELD_REQUEST_TIMEOUT_SECS";

/// Configuration for the HTTP backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend, without the `/api` prefix.
    pub base_url: String,
    /// Timeout applied to each request individually.
    pub request_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("omniyield/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl BackendConfig {
    /// Builds a configuration from the process environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_url = url;
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "Ignoring invalid request timeout"),
            }
        }

        config
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Root of the API routes, e.g. `http://localhost:8000/api`.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }
}
