//! HTTP client wrapper with retry logic and response caching.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::cache::{ResponseCache, cache_key};
use super::config::FinnhubConfig;
use super::error::FinnhubError;
use crate::infrastructure::retry::{Backoff, FailureKind, RetryPolicy};

/// HTTP client for the Finnhub API.
#[derive(Debug)]
pub struct FinnhubHttpClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
    cache: ResponseCache,
}

impl FinnhubHttpClient {
    /// Create a new HTTP client from config.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if no key is configured, or `Http` if the
    /// underlying client cannot be built.
    pub fn new(config: &FinnhubConfig) -> Result<Self, FinnhubError> {
        if config.api_key.trim().is_empty() {
            return Err(FinnhubError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FinnhubError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry.clone(),
            cache: ResponseCache::new(config.cache.longest()),
        })
    }

    /// GET `path` and decode the body, serving from cache when younger than `ttl`.
    ///
    /// # Errors
    ///
    /// Returns the failure of the final attempt once retries are exhausted,
    /// or `JsonParse` if the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        ttl: Duration,
    ) -> Result<T, FinnhubError> {
        let key = cache_key(path, query);

        let body = if let Some(cached) = self.cache.get(&key, ttl) {
            tracing::trace!(key = %key, "Finnhub cache hit");
            cached
        } else {
            let fresh = self.fetch(path, query).await?;
            if !ttl.is_zero() {
                self.cache.insert(key, fresh.clone());
            }
            fresh
        };

        serde_json::from_value(body).map_err(|e| FinnhubError::JsonParse(e.to_string()))
    }

    /// Request loop; every failure is retried under the policy.
    async fn fetch(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, FinnhubError> {
        let url = format!("{}{path}", self.base_url);
        let mut backoff = Backoff::new(&self.retry);

        loop {
            let request = self
                .client
                .get(&url)
                .query(query)
                .query(&[("token", self.api_key.as_str())]);

            let (kind, error) = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.json::<serde_json::Value>().await {
                            Ok(body) => return Ok(body),
                            Err(e) => (FailureKind::Transient, FinnhubError::JsonParse(e.to_string())),
                        }
                    } else {
                        let kind = FailureKind::from_status(status.as_u16());
                        let error = match kind {
                            FailureKind::RateLimited => FinnhubError::RateLimited,
                            FailureKind::Transient => FinnhubError::Api {
                                status: status.as_u16(),
                                message: response.text().await.unwrap_or_default(),
                            },
                        };
                        (kind, error)
                    }
                }
                Err(e) => (FailureKind::Transient, FinnhubError::Http(e.to_string())),
            };

            if let Some(delay) = backoff.next_delay(kind) {
                tracing::warn!(
                    path,
                    error = %error,
                    delay_ms = delay.as_millis(),
                    attempt = backoff.attempts(),
                    "Finnhub request failed, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(match error {
                FinnhubError::RateLimited => FinnhubError::RateLimited,
                other => FinnhubError::MaxRetriesExceeded {
                    attempts: backoff.attempts(),
                    last_error: other.to_string(),
                },
            });
        }
    }
}
