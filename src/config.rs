//! Connection settings for the Ticimax API.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://ticimaxwebservice.azurewebsites.net";

/// Request timeout in seconds. Zero disables the timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Retries after the first attempt.
pub const DEFAULT_RETRY_TIMES: u32 = 3;

/// Base backoff delay in milliseconds; doubled for each further retry.
pub const DEFAULT_RETRY_SLEEP_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub retry_times: u32,
    pub retry_sleep_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_times: DEFAULT_RETRY_TIMES,
            retry_sleep_ms: DEFAULT_RETRY_SLEEP_MS,
        }
    }
}

impl ClientConfig {
    /// Config for `base_url` and `api_key` with default timeout and retry settings.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Per-request timeout, or `None` when `timeout_secs` is 0 (wait indefinitely).
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn retry_sleep(&self) -> Duration {
        Duration::from_millis(self.retry_sleep_ms)
    }

    /// Base URL without trailing slashes, ready to have endpoint paths appended.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
