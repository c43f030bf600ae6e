//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::Symbol;

/// Body for adding a watchlist entry or alert. The owner comes from the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddStockRequest {
    /// Symbol.
    #[serde(default)]
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company: String,
}

/// Query for news selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsQuery {
    /// Comma-separated symbols; absent or empty selects general news.
    #[serde(default)]
    pub symbols: Option<String>,
}

impl NewsQuery {
    /// Parsed, normalized symbols.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.symbols
            .as_deref()
            .map(|raw| raw.split(',').collect::<Vec<_>>())
            .map(|parts| Symbol::normalize_all(&parts))
            .unwrap_or_default()
    }
}

/// Query for symbol search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free text; empty lists popular symbols.
    #[serde(default)]
    pub q: String,
}
