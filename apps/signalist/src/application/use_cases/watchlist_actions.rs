//! Watchlist Actions
//!
//! Add, remove and list watchlist entries for the session user.

use std::sync::Arc;

use crate::application::dto::ActionResult;
use crate::application::ports::{RepositoryError, WatchlistRepository};
use crate::domain::{Symbol, UserId, WatchlistItem};

/// Outcome message for blank input.
pub(crate) const MISSING_FIELDS: &str = "Missing required fields";

/// Use case for managing a user's watchlist.
pub struct WatchlistService<W>
where
    W: WatchlistRepository,
{
    watchlist_repo: Arc<W>,
}

impl<W> WatchlistService<W>
where
    W: WatchlistRepository,
{
    /// Create a watchlist service.
    pub const fn new(watchlist_repo: Arc<W>) -> Self {
        Self { watchlist_repo }
    }

    /// Add `symbol` to the user's watchlist.
    pub async fn add(&self, user_id: &UserId, symbol: &str, company: &str) -> ActionResult {
        let symbol = Symbol::new(symbol);
        if user_id.as_str().is_empty() || symbol.as_str().is_empty() || company.trim().is_empty()
        {
            return ActionResult::failed(MISSING_FIELDS);
        }

        match self.watchlist_repo.find(user_id, &symbol).await {
            Ok(Some(_)) => return ActionResult::failed("Stock already in watchlist"),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(user_id = %user_id, symbol = %symbol, error = %e, "Watchlist lookup failed");
                return ActionResult::failed("Failed to add to watchlist");
            }
        }

        let item = WatchlistItem::new(user_id.clone(), symbol.clone(), company);
        match self.watchlist_repo.insert(item).await {
            Ok(()) => {
                tracing::info!(user_id = %user_id, symbol = %symbol, "Added to watchlist");
                ActionResult::ok("Added to watchlist")
            }
            Err(RepositoryError::Duplicate { .. }) => {
                ActionResult::failed("Stock already in watchlist")
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, symbol = %symbol, error = %e, "Watchlist insert failed");
                ActionResult::failed("Failed to add to watchlist")
            }
        }
    }

    /// Remove `symbol` from the user's watchlist.
    pub async fn remove(&self, user_id: &UserId, symbol: &str) -> ActionResult {
        let symbol = Symbol::new(symbol);
        if user_id.as_str().is_empty() || symbol.as_str().is_empty() {
            return ActionResult::failed(MISSING_FIELDS);
        }

        match self.watchlist_repo.delete(user_id, &symbol).await {
            Ok(true) => {
                tracing::info!(user_id = %user_id, symbol = %symbol, "Removed from watchlist");
                ActionResult::ok("Removed from watchlist")
            }
            Ok(false) => ActionResult::failed("Stock not found in watchlist"),
            Err(e) => {
                tracing::error!(user_id = %user_id, symbol = %symbol, error = %e, "Watchlist delete failed");
                ActionResult::failed("Failed to remove from watchlist")
            }
        }
    }

    /// The user's watchlist entries; empty on storage failure.
    pub async fn items(&self, user_id: &UserId) -> Vec<WatchlistItem> {
        self.watchlist_repo
            .list_by_user(user_id)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Watchlist listing failed");
                Vec::new()
            })
    }

    /// The user's watchlist symbols; empty on storage failure.
    pub async fn symbols(&self, user_id: &UserId) -> Vec<Symbol> {
        self.items(user_id)
            .await
            .into_iter()
            .map(|item| item.symbol)
            .collect()
    }
}
