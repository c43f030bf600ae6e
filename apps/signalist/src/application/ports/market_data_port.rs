//! Market Data Port (Driven Port)
//!
//! Interface for fetching quotes, company data and news from a market data
//! provider. Implementations own transport concerns (retry, caching); callers
//! decide how to degrade when a call fails.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Financials, Profile, Quote, RawArticle, Symbol};

/// One hit from a symbol search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    /// Symbol.
    pub symbol: String,
    /// Company description.
    pub description: String,
    /// Display symbol.
    pub display_symbol: String,
    /// Security type (e.g. "Common Stock").
    pub security_type: String,
}

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Rate limited and out of retries.
    #[error("Market data rate limited")]
    RateLimited,

    /// Provider returned a non-success status.
    #[error("Market data API error {status}: {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body or message.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Invalid market data response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

/// Port for fetching market data from an external provider.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Get the current quote for a symbol.
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError>;

    /// Get the company profile for a symbol.
    async fn profile(&self, symbol: &Symbol) -> Result<Profile, MarketDataError>;

    /// Get basic financial metrics for a symbol.
    async fn financials(&self, symbol: &Symbol) -> Result<Financials, MarketDataError>;

    /// Get company news published between `from` and `to` (inclusive).
    async fn company_news(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawArticle>, MarketDataError>;

    /// Get general market news.
    async fn general_news(&self) -> Result<Vec<RawArticle>, MarketDataError>;

    /// Search symbols by free-text query.
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError>;
}
