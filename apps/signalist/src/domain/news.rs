//! News articles.
//!
//! A [`RawArticle`] is what the market data port returns. Only valid articles
//! (non-empty headline, summary and url) are ever turned into an [`Article`].

use serde::{Deserialize, Serialize};

use super::Symbol;

/// Summary length kept for company news.
const COMPANY_SUMMARY_CHARS: usize = 200;

/// Summary length kept for general market news.
const GENERAL_SUMMARY_CHARS: usize = 150;

/// Category assigned to articles fetched per symbol.
pub const COMPANY_CATEGORY: &str = "company";

/// News article as delivered by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawArticle {
    /// Provider article ID.
    pub id: i64,
    /// Provider category (e.g. "general").
    pub category: String,
    /// Publish time, Unix seconds.
    pub datetime: i64,
    /// Headline.
    pub headline: String,
    /// Image URL.
    pub image: String,
    /// Related symbol tag.
    pub related: String,
    /// Publisher.
    pub source: String,
    /// Summary text.
    pub summary: String,
    /// Article URL.
    pub url: String,
}

impl RawArticle {
    /// An article is usable only with a headline, a summary and a url.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.headline.trim().is_empty()
            && !self.summary.trim().is_empty()
            && !self.url.trim().is_empty()
    }

    /// Composite key used to deduplicate general news.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        format!("{}-{}-{}", self.id, self.url, self.headline)
    }
}

/// Display-ready news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Provider article ID.
    pub id: i64,
    /// Headline.
    pub headline: String,
    /// Truncated summary.
    pub summary: String,
    /// Publisher.
    pub source: String,
    /// Article URL.
    pub url: String,
    /// Publish time, Unix seconds.
    pub datetime: i64,
    /// Image URL.
    pub image: String,
    /// Category.
    pub category: String,
    /// Related symbol tag.
    pub related: String,
}

impl Article {
    /// Format an article fetched for a specific symbol.
    #[must_use]
    pub fn from_company(raw: RawArticle, symbol: &Symbol) -> Self {
        let source = non_empty_or(raw.source.trim(), "Company News");
        Self {
            id: raw.id,
            headline: raw.headline.trim().to_string(),
            summary: truncate_summary(&raw.summary, COMPANY_SUMMARY_CHARS),
            source,
            url: raw.url,
            datetime: raw.datetime,
            image: raw.image,
            category: COMPANY_CATEGORY.to_string(),
            related: symbol.as_str().to_string(),
        }
    }

    /// Format a general market news article.
    #[must_use]
    pub fn from_general(raw: RawArticle) -> Self {
        let source = non_empty_or(raw.source.trim(), "Market News");
        let category = non_empty_or(raw.category.trim(), "general");
        Self {
            id: raw.id,
            headline: raw.headline.trim().to_string(),
            summary: truncate_summary(&raw.summary, GENERAL_SUMMARY_CHARS),
            source,
            url: raw.url,
            datetime: raw.datetime,
            image: raw.image,
            category,
            related: raw.related,
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Trim and cut a summary to `max_chars`, appending `...` when cut.
fn truncate_summary(summary: &str, max_chars: usize) -> String {
    let trimmed = summary.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
