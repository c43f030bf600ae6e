//! Finnhub implementation of `MarketDataPort`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::api_types::{MetricResponse, NewsItem, ProfileResponse, QuoteResponse, SearchResponse};
use super::config::{CacheTtls, FinnhubConfig};
use super::error::FinnhubError;
use super::http_client::FinnhubHttpClient;
use crate::application::ports::{MarketDataError, MarketDataPort, SymbolMatch};
use crate::domain::{Financials, Profile, Quote, RawArticle, Symbol};

/// Finnhub market data adapter.
#[derive(Debug)]
pub struct FinnhubMarketDataAdapter {
    http: FinnhubHttpClient,
    ttls: CacheTtls,
}

impl FinnhubMarketDataAdapter {
    /// Create a new adapter.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the client cannot be built.
    pub fn new(config: &FinnhubConfig) -> Result<Self, FinnhubError> {
        Ok(Self {
            http: FinnhubHttpClient::new(config)?,
            ttls: config.cache,
        })
    }

    fn news_ttl(&self) -> Duration {
        Duration::from_secs(self.ttls.news_secs)
    }
}

#[async_trait]
impl MarketDataPort for FinnhubMarketDataAdapter {
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        let response: QuoteResponse = self
            .http
            .get_json(
                "/quote",
                &[("symbol", symbol.as_str())],
                Duration::from_secs(self.ttls.quote_secs),
            )
            .await?;
        Ok(response.into_quote(symbol.clone()))
    }

    async fn profile(&self, symbol: &Symbol) -> Result<Profile, MarketDataError> {
        let response: ProfileResponse = self
            .http
            .get_json(
                "/stock/profile2",
                &[("symbol", symbol.as_str())],
                Duration::from_secs(self.ttls.profile_secs),
            )
            .await?;
        Ok(response.into_profile(symbol.clone()))
    }

    async fn financials(&self, symbol: &Symbol) -> Result<Financials, MarketDataError> {
        let response: MetricResponse = self
            .http
            .get_json(
                "/stock/metric",
                &[("symbol", symbol.as_str()), ("metric", "all")],
                Duration::from_secs(self.ttls.metric_secs),
            )
            .await?;
        Ok(response.into_financials(symbol.clone()))
    }

    async fn company_news(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawArticle>, MarketDataError> {
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        let items: Option<Vec<NewsItem>> = self
            .http
            .get_json(
                "/company-news",
                &[
                    ("symbol", symbol.as_str()),
                    ("from", from.as_str()),
                    ("to", to.as_str()),
                ],
                self.news_ttl(),
            )
            .await?;
        Ok(items
            .unwrap_or_default()
            .into_iter()
            .map(RawArticle::from)
            .collect())
    }

    async fn general_news(&self) -> Result<Vec<RawArticle>, MarketDataError> {
        let items: Option<Vec<NewsItem>> = self
            .http
            .get_json("/news", &[("category", "general")], self.news_ttl())
            .await?;
        Ok(items
            .unwrap_or_default()
            .into_iter()
            .map(RawArticle::from)
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        let response: SearchResponse = self
            .http
            .get_json(
                "/search",
                &[("q", query)],
                Duration::from_secs(self.ttls.search_secs),
            )
            .await?;
        Ok(response
            .result
            .unwrap_or_default()
            .into_iter()
            .map(SymbolMatch::from)
            .collect())
    }
}
