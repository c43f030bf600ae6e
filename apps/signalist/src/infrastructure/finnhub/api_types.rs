//! Finnhub API request/response types.
//!
//! Finnhub omits fields or sends `null` freely (an unknown symbol's profile
//! is `{}`), so every field is optional and defaults are applied when
//! converting to domain types.

use std::collections::HashMap;

use serde::Deserialize;

use crate::application::ports::SymbolMatch;
use crate::domain::{Financials, Profile, Quote, RawArticle, Symbol};

/// `/quote` response.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteResponse {
    /// Current price.
    pub c: Option<f64>,
    /// Percent change.
    pub dp: Option<f64>,
    /// High of the day.
    pub h: Option<f64>,
    /// Low of the day.
    pub l: Option<f64>,
    /// Open of the day.
    pub o: Option<f64>,
    /// Previous close.
    pub pc: Option<f64>,
}

impl QuoteResponse {
    /// Convert to a domain quote; missing values read as zero.
    #[must_use]
    pub fn into_quote(self, symbol: Symbol) -> Quote {
        Quote {
            symbol,
            current: self.c.unwrap_or_default(),
            change_percent: self.dp.unwrap_or_default(),
            high: self.h.unwrap_or_default(),
            low: self.l.unwrap_or_default(),
            open: self.o.unwrap_or_default(),
            previous_close: self.pc.unwrap_or_default(),
        }
    }
}

/// `/stock/profile2` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Company name.
    pub name: Option<String>,
    /// Ticker.
    pub ticker: Option<String>,
    /// Listing exchange.
    pub exchange: Option<String>,
    /// Market capitalisation in millions.
    pub market_capitalization: Option<f64>,
}

impl ProfileResponse {
    /// Convert to a domain profile.
    #[must_use]
    pub fn into_profile(self, symbol: Symbol) -> Profile {
        Profile {
            symbol,
            name: self.name.unwrap_or_default(),
            ticker: self.ticker.unwrap_or_default(),
            exchange: self.exchange.unwrap_or_default(),
            market_capitalization: self.market_capitalization.unwrap_or_default(),
        }
    }
}

/// `/stock/metric?metric=all` response.
#[derive(Debug, Default, Deserialize)]
pub struct MetricResponse {
    /// Metric values; some are strings or null.
    #[serde(default)]
    pub metric: Option<HashMap<String, serde_json::Value>>,
}

impl MetricResponse {
    /// Convert to domain financials, keeping only numeric metrics.
    #[must_use]
    pub fn into_financials(self, symbol: Symbol) -> Financials {
        let metric = self
            .metric
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(name, value)| value.as_f64().map(|number| (name, number)))
            .collect();
        Financials { symbol, metric }
    }
}

/// One article from `/company-news` or `/news`.
#[derive(Debug, Default, Deserialize)]
pub struct NewsItem {
    /// Article ID.
    pub id: Option<i64>,
    /// Category.
    pub category: Option<String>,
    /// Publish time, Unix seconds.
    pub datetime: Option<i64>,
    /// Headline.
    pub headline: Option<String>,
    /// Image URL.
    pub image: Option<String>,
    /// Related symbols.
    pub related: Option<String>,
    /// Publisher.
    pub source: Option<String>,
    /// Summary.
    pub summary: Option<String>,
    /// Article URL.
    pub url: Option<String>,
}

impl From<NewsItem> for RawArticle {
    fn from(item: NewsItem) -> Self {
        Self {
            id: item.id.unwrap_or_default(),
            category: item.category.unwrap_or_default(),
            datetime: item.datetime.unwrap_or_default(),
            headline: item.headline.unwrap_or_default(),
            image: item.image.unwrap_or_default(),
            related: item.related.unwrap_or_default(),
            source: item.source.unwrap_or_default(),
            summary: item.summary.unwrap_or_default(),
            url: item.url.unwrap_or_default(),
        }
    }
}

/// `/search` response.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    /// Number of hits.
    #[serde(default)]
    pub count: Option<u32>,
    /// Hits.
    #[serde(default)]
    pub result: Option<Vec<SearchHit>>,
}

/// One `/search` hit.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Symbol.
    pub symbol: Option<String>,
    /// Company description.
    pub description: Option<String>,
    /// Display symbol.
    pub display_symbol: Option<String>,
    /// Security type.
    #[serde(rename = "type")]
    pub security_type: Option<String>,
}

impl From<SearchHit> for SymbolMatch {
    fn from(hit: SearchHit) -> Self {
        Self {
            symbol: hit.symbol.unwrap_or_default(),
            description: hit.description.unwrap_or_default(),
            display_symbol: hit.display_symbol.unwrap_or_default(),
            security_type: hit.security_type.unwrap_or_default(),
        }
    }
}
