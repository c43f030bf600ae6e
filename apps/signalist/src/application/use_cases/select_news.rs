//! News Selection Use Case
//!
//! Picks a small, balanced set of articles for a list of symbols. Company news
//! is gathered per symbol and interleaved round-robin so no single symbol
//! dominates; when nothing is collected the selector falls back to
//! deduplicated general market news.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::application::ports::{MarketDataError, MarketDataPort};
use crate::domain::{Article, RawArticle, Symbol};

/// News selection error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NewsError {
    /// The general news fallback could not be fetched.
    #[error("Failed to fetch news: {0}")]
    Upstream(#[from] MarketDataError),
}

/// Selection limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSettings {
    /// Maximum articles returned.
    pub max_articles: usize,
    /// Days of company news to look back.
    pub lookback_days: i64,
    /// Unique general articles scanned before stopping.
    pub general_scan_limit: usize,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            max_articles: 6,
            lookback_days: 5,
            general_scan_limit: 20,
        }
    }
}

/// Interleave queues, taking one item per queue per round.
///
/// Returns `(queue index, item)` pairs, at most `limit` of them. Empty queues
/// are skipped; selection ends when every queue is drained.
pub fn round_robin<T>(mut queues: Vec<VecDeque<T>>, limit: usize) -> Vec<(usize, T)> {
    let mut picked = Vec::with_capacity(limit);

    while picked.len() < limit {
        let mut took_any = false;
        for (index, queue) in queues.iter_mut().enumerate() {
            if picked.len() >= limit {
                break;
            }
            if let Some(item) = queue.pop_front() {
                picked.push((index, item));
                took_any = true;
            }
        }
        if !took_any {
            break;
        }
    }

    picked
}

/// Use case for selecting news articles.
pub struct NewsSelector<M>
where
    M: MarketDataPort,
{
    market_data: Arc<M>,
    settings: NewsSettings,
}

impl<M> NewsSelector<M>
where
    M: MarketDataPort,
{
    /// Create a news selector.
    pub const fn new(market_data: Arc<M>, settings: NewsSettings) -> Self {
        Self {
            market_data,
            settings,
        }
    }

    /// Select articles for `symbols`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `NewsError` only when the general news fallback fails; per-symbol
    /// failures are treated as "no articles" for that symbol.
    pub async fn select(&self, symbols: &[Symbol]) -> Result<Vec<Article>, NewsError> {
        let symbols = unique_symbols(symbols);

        if !symbols.is_empty() {
            let articles = self.company_articles(&symbols).await;
            if !articles.is_empty() {
                return Ok(articles);
            }
            tracing::debug!(
                symbols = symbols.len(),
                "No company news collected, using general news"
            );
        }

        self.general_articles().await
    }

    async fn company_articles(&self, symbols: &[Symbol]) -> Vec<Article> {
        let to = Utc::now().date_naive();
        let from = to - Duration::days(self.settings.lookback_days);

        let queues: Vec<VecDeque<RawArticle>> =
            join_all(symbols.iter().map(|symbol| async move {
                match self.market_data.company_news(symbol, from, to).await {
                    Ok(articles) => articles.into_iter().filter(RawArticle::is_valid).collect(),
                    Err(e) => {
                        tracing::warn!(symbol = %symbol, error = %e, "Company news unavailable");
                        VecDeque::new()
                    }
                }
            }))
            .await;

        let mut articles: Vec<Article> = round_robin(queues, self.settings.max_articles)
            .into_iter()
            .map(|(index, raw)| Article::from_company(raw, &symbols[index]))
            .collect();

        articles.sort_by(|a, b| b.datetime.cmp(&a.datetime));
        articles
    }

    async fn general_articles(&self) -> Result<Vec<Article>, NewsError> {
        let raw = self.market_data.general_news().await.map_err(|e| {
            tracing::error!(error = %e, "General news unavailable");
            NewsError::from(e)
        })?;

        let mut seen = HashSet::new();
        let unique: Vec<RawArticle> = raw
            .into_iter()
            .filter(RawArticle::is_valid)
            .filter(|article| seen.insert(article.dedup_key()))
            .take(self.settings.general_scan_limit)
            .collect();

        Ok(unique
            .into_iter()
            .take(self.settings.max_articles)
            .map(Article::from_general)
            .collect())
    }
}

/// Drop empty and repeated symbols, keeping first-seen order.
fn unique_symbols(symbols: &[Symbol]) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    symbols
        .iter()
        .filter(|symbol| !symbol.as_str().is_empty())
        .filter(|symbol| seen.insert((*symbol).clone()))
        .cloned()
        .collect()
}
