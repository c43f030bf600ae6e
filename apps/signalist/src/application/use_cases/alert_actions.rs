//! Alert Actions
//!
//! Enable, disable and list hourly alerts for the session user.

use std::sync::Arc;

use crate::application::dto::ActionResult;
use crate::application::ports::{AlertRepository, RepositoryError};
use crate::domain::{Alert, Symbol, UserId};

use super::watchlist_actions::MISSING_FIELDS;

/// Use case for managing a user's hourly alerts.
pub struct AlertService<A>
where
    A: AlertRepository,
{
    alert_repo: Arc<A>,
}

impl<A> AlertService<A>
where
    A: AlertRepository,
{
    /// Create an alert service.
    pub const fn new(alert_repo: Arc<A>) -> Self {
        Self { alert_repo }
    }

    /// Enable the hourly alert for `symbol`.
    pub async fn add(&self, user_id: &UserId, symbol: &str, company: &str) -> ActionResult {
        let symbol = Symbol::new(symbol);
        if user_id.as_str().is_empty() || symbol.as_str().is_empty() || company.trim().is_empty()
        {
            return ActionResult::failed(MISSING_FIELDS);
        }

        match self.alert_repo.find(user_id, &symbol).await {
            Ok(Some(_)) => return ActionResult::failed("Alert already exists for this stock"),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(user_id = %user_id, symbol = %symbol, error = %e, "Alert lookup failed");
                return ActionResult::failed("Failed to enable alert");
            }
        }

        let alert = Alert::new(user_id.clone(), symbol.clone(), company);
        let alert_id = alert.id;
        match self.alert_repo.insert(alert).await {
            Ok(()) => {
                tracing::info!(user_id = %user_id, symbol = %symbol, %alert_id, "Hourly alert enabled");
                ActionResult::ok("Hourly alert enabled")
            }
            Err(RepositoryError::Duplicate { .. }) => {
                ActionResult::failed("Alert already exists for this stock")
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, symbol = %symbol, error = %e, "Alert insert failed");
                ActionResult::failed("Failed to enable alert")
            }
        }
    }

    /// Disable the hourly alert for `symbol`.
    pub async fn remove(&self, user_id: &UserId, symbol: &str) -> ActionResult {
        let symbol = Symbol::new(symbol);
        if user_id.as_str().is_empty() || symbol.as_str().is_empty() {
            return ActionResult::failed(MISSING_FIELDS);
        }

        match self.alert_repo.delete(user_id, &symbol).await {
            Ok(true) => ActionResult::ok("Alert removed"),
            Ok(false) => ActionResult::failed("Alert not found"),
            Err(e) => {
                tracing::error!(user_id = %user_id, symbol = %symbol, error = %e, "Alert delete failed");
                ActionResult::failed("Failed to remove alert")
            }
        }
    }

    /// Symbols with an active alert; empty on storage failure.
    pub async fn symbols(&self, user_id: &UserId) -> Vec<Symbol> {
        match self.alert_repo.list_by_user(user_id).await {
            Ok(alerts) => alerts.into_iter().map(|alert| alert.symbol).collect(),
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Alert listing failed");
                Vec::new()
            }
        }
    }
}
