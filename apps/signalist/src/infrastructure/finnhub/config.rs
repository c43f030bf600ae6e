//! Finnhub adapter configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::retry::RetryPolicy;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Response cache lifetimes, in seconds. Zero disables caching for that call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheTtls {
    /// `/quote`.
    pub quote_secs: u64,
    /// `/stock/profile2`.
    pub profile_secs: u64,
    /// `/stock/metric`.
    pub metric_secs: u64,
    /// `/search`.
    pub search_secs: u64,
    /// `/company-news` and `/news`.
    pub news_secs: u64,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            quote_secs: 300,
            profile_secs: 7200,
            metric_secs: 7200,
            search_secs: 1800,
            news_secs: 300,
        }
    }
}

impl CacheTtls {
    /// No caching at all.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            quote_secs: 0,
            profile_secs: 0,
            metric_secs: 0,
            search_secs: 0,
            news_secs: 0,
        }
    }

    /// Longest configured lifetime.
    #[must_use]
    pub fn longest(&self) -> Duration {
        let secs = [
            self.quote_secs,
            self.profile_secs,
            self.metric_secs,
            self.search_secs,
            self.news_secs,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        Duration::from_secs(secs)
    }
}

/// Configuration for the Finnhub adapter.
#[derive(Clone)]
pub struct FinnhubConfig {
    /// API key.
    pub api_key: String,
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy.
    pub retry: RetryPolicy,
    /// Response cache lifetimes.
    pub cache: CacheTtls,
}

impl fmt::Debug for FinnhubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinnhubConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("cache", &self.cache)
            .finish()
    }
}

impl FinnhubConfig {
    /// Create a configuration for the production API.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            cache: CacheTtls::default(),
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the cache lifetimes.
    #[must_use]
    pub const fn with_cache(mut self, cache: CacheTtls) -> Self {
        self.cache = cache;
        self
    }
}
