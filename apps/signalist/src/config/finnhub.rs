//! Finnhub connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::finnhub::{CacheTtls, DEFAULT_BASE_URL, FinnhubConfig};
use crate::infrastructure::retry::RetryPolicy;

/// Finnhub section of the config file.
#[derive(Clone, Serialize, Deserialize)]
pub struct FinnhubSettings {
    /// API key, usually `${FINNHUB_API_KEY}`.
    #[serde(default)]
    pub api_key: String,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retry policy.
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Response cache lifetimes.
    #[serde(default)]
    pub cache: CacheTtls,
}

impl Default for FinnhubSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            retry: RetryPolicy::default(),
            cache: CacheTtls::default(),
        }
    }
}

impl std::fmt::Debug for FinnhubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinnhubSettings")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .field("cache", &self.cache)
            .finish()
    }
}

impl FinnhubSettings {
    /// Adapter configuration.
    #[must_use]
    pub fn to_adapter_config(&self) -> FinnhubConfig {
        FinnhubConfig::new(self.api_key.trim())
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(self.retry.clone())
            .with_cache(self.cache)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}
