//! Stock Search Use Case

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::dto::SearchResult;
use crate::application::ports::{
    MarketDataError, MarketDataPort, SymbolMatch, WatchlistRepository,
};
use crate::domain::{Symbol, UserId};

/// Symbols listed when the search query is empty, most popular first.
pub const POPULAR_STOCK_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "META", "NVDA", "NFLX", "ORCL", "CRM", "ADBE",
    "INTC", "AMD", "PYPL", "UBER", "SHOP", "SPOT", "SQ", "COIN", "PLTR",
];

/// Search limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Popular symbols listed for an empty query.
    pub popular_count: usize,
    /// Pause between sequential profile lookups for the popular listing.
    pub popular_delay: Duration,
    /// Maximum results returned.
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            popular_count: 10,
            popular_delay: Duration::from_millis(100),
            max_results: 15,
        }
    }
}

/// Use case for searching symbols.
pub struct StockSearch<M, W>
where
    M: MarketDataPort,
    W: WatchlistRepository,
{
    market_data: Arc<M>,
    watchlist_repo: Arc<W>,
    settings: SearchSettings,
}

impl<M, W> StockSearch<M, W>
where
    M: MarketDataPort,
    W: WatchlistRepository,
{
    /// Create a stock search.
    pub const fn new(market_data: Arc<M>, watchlist_repo: Arc<W>, settings: SearchSettings) -> Self {
        Self {
            market_data,
            watchlist_repo,
            settings,
        }
    }

    /// Search by free text; a blank query lists popular symbols.
    ///
    /// Failures are logged and produce an empty list.
    pub async fn search(&self, query: &str, user_id: Option<&UserId>) -> Vec<SearchResult> {
        let query = query.trim();

        let candidates = if query.is_empty() {
            self.popular().await
        } else {
            match self.market_data.search(query).await {
                Ok(matches) => matches.into_iter().map(Candidate::from).collect(),
                Err(e) => {
                    tracing::error!(query, error = %e, "Stock search failed");
                    return Vec::new();
                }
            }
        };

        let watched = self.watched_symbols(user_id).await;

        candidates
            .into_iter()
            .take(self.settings.max_results)
            .map(|candidate| candidate.into_result(&watched))
            .collect()
    }

    /// Profiles of the popular symbols, fetched one at a time.
    async fn popular(&self) -> Vec<Candidate> {
        let symbols = POPULAR_STOCK_SYMBOLS
            .iter()
            .take(self.settings.popular_count)
            .map(Symbol::new);

        let mut candidates = Vec::new();
        for (index, symbol) in symbols.enumerate() {
            if index > 0 && !self.settings.popular_delay.is_zero() {
                tokio::time::sleep(self.settings.popular_delay).await;
            }

            match self.market_data.profile(&symbol).await {
                Ok(profile) => {
                    let name = if profile.name.is_empty() {
                        profile.ticker
                    } else {
                        profile.name
                    };
                    if name.is_empty() {
                        continue;
                    }
                    candidates.push(Candidate {
                        hit: SymbolMatch {
                            symbol: symbol.into_inner(),
                            description: name,
                            display_symbol: String::new(),
                            security_type: "Common Stock".to_string(),
                        },
                        exchange: profile.exchange,
                    });
                }
                Err(MarketDataError::RateLimited) => {
                    tracing::debug!(symbol = %symbol, "Popular profile rate limited");
                }
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "Popular profile unavailable");
                }
            }
        }
        candidates
    }

    async fn watched_symbols(&self, user_id: Option<&UserId>) -> HashSet<Symbol> {
        let Some(user_id) = user_id else {
            return HashSet::new();
        };
        match self.watchlist_repo.list_by_user(user_id).await {
            Ok(items) => items.into_iter().map(|item| item.symbol).collect(),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Watchlist unavailable for search");
                HashSet::new()
            }
        }
    }
}

/// A search hit plus the listing exchange when known from a profile.
struct Candidate {
    hit: SymbolMatch,
    exchange: String,
}

impl From<SymbolMatch> for Candidate {
    fn from(hit: SymbolMatch) -> Self {
        Self {
            hit,
            exchange: String::new(),
        }
    }
}

impl Candidate {
    fn into_result(self, watched: &HashSet<Symbol>) -> SearchResult {
        let symbol = Symbol::new(&self.hit.symbol);
        let name = if self.hit.description.is_empty() {
            symbol.as_str().to_string()
        } else {
            self.hit.description
        };
        let exchange = [self.hit.display_symbol, self.exchange]
            .into_iter()
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| "US".to_string());
        let security_type = if self.hit.security_type.is_empty() {
            "Stock".to_string()
        } else {
            self.hit.security_type
        };

        SearchResult {
            is_in_watchlist: watched.contains(&symbol),
            symbol,
            name,
            exchange,
            security_type,
        }
    }
}
