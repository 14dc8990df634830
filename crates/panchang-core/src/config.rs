//! Provider configuration.
//!
//! # Environment Variables
//!
//! | Setting | Primary Env Var | Fallback Env Var | Default |
//! |---------|-----------------|------------------|---------|
//! | Base URL | `PANCHANG_API_BASE_URL` | `ASTROLOGY_API_BASE_URL` | `https://json.freeastrologyapi.com` |
//! | API key | `PANCHANG_API_KEY` | `ASTROLOGY_API_KEY` | `demo` |
//! | Per-call timeout (ms) | `PANCHANG_API_TIMEOUT_MS` | - | `8000` |
//! | Concurrent fan-out calls | `PANCHANG_API_MAX_CONCURRENCY` | - | `21` |

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://json.freeastrologyapi.com";
pub const PLACEHOLDER_API_KEY: &str = "demo";
pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_MAX_CONCURRENCY: usize = 21;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout: Duration,
    pub max_concurrency: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_key: String::from(PLACEHOLDER_API_KEY),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl ProviderConfig {
    /// Reads settings from the environment, falling back to defaults.
    ///
    /// Unparseable numeric values are ignored rather than rejected.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("PANCHANG_API_BASE_URL")
            .or_else(|_| env::var("ASTROLOGY_API_BASE_URL"))
            .unwrap_or(defaults.base_url);
        let api_key = env::var("PANCHANG_API_KEY")
            .or_else(|_| env::var("ASTROLOGY_API_KEY"))
            .unwrap_or(defaults.api_key);
        let request_timeout = env::var("PANCHANG_API_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);
        let max_concurrency = env::var("PANCHANG_API_MAX_CONCURRENCY")
            .ok()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(defaults.max_concurrency);

        Self {
            base_url,
            api_key,
            request_timeout,
            max_concurrency,
        }
        .normalized()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self.normalized()
    }

    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }

    /// Joins the base URL with an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn normalized(mut self) -> Self {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self.max_concurrency = self.max_concurrency.max(1);
        self
    }
}
