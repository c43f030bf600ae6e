//! Repository Ports (Driven Ports)
//!
//! Storage for watchlist entries, alerts and user lookups. Implementations
//! must enforce one entry per (user id, symbol) and report a violation as
//! [`RepositoryError::Duplicate`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Alert, Symbol, UserAccount, UserId, WatchlistItem};

/// Storage error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Uniqueness constraint on (user id, symbol) violated.
    #[error("Duplicate entry for user {user_id} and symbol {symbol}")]
    Duplicate {
        /// Owner.
        user_id: String,
        /// Symbol.
        symbol: String,
    },

    /// Backend failure.
    #[error("Storage error: {message}")]
    Storage {
        /// Error details.
        message: String,
    },
}

/// Watchlist storage.
#[async_trait]
pub trait WatchlistRepository: Send + Sync {
    /// Insert an entry; fails with `Duplicate` if (user, symbol) exists.
    async fn insert(&self, item: WatchlistItem) -> Result<(), RepositoryError>;

    /// Find an entry.
    async fn find(
        &self,
        user_id: &UserId,
        symbol: &Symbol,
    ) -> Result<Option<WatchlistItem>, RepositoryError>;

    /// Delete an entry. Returns whether anything was deleted.
    async fn delete(&self, user_id: &UserId, symbol: &Symbol) -> Result<bool, RepositoryError>;

    /// List a user's entries in insertion order.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<WatchlistItem>, RepositoryError>;
}

/// Alert storage.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Insert an alert; fails with `Duplicate` if (user, symbol) exists.
    async fn insert(&self, alert: Alert) -> Result<(), RepositoryError>;

    /// Find an alert.
    async fn find(&self, user_id: &UserId, symbol: &Symbol)
    -> Result<Option<Alert>, RepositoryError>;

    /// Delete an alert. Returns whether anything was deleted.
    async fn delete(&self, user_id: &UserId, symbol: &Symbol) -> Result<bool, RepositoryError>;

    /// List a user's alerts in insertion order.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Alert>, RepositoryError>;

    /// List every alert in insertion order.
    async fn list_all(&self) -> Result<Vec<Alert>, RepositoryError>;

    /// Set `last_sent_at` on the user's alerts for `symbols`.
    ///
    /// Returns the number of alerts updated.
    async fn mark_sent(
        &self,
        user_id: &UserId,
        symbols: &[Symbol],
        sent_at: DateTime<Utc>,
    ) -> Result<usize, RepositoryError>;
}

/// Read access to registered users.
#[async_trait]
pub trait UserDirectoryPort: Send + Sync {
    /// Find a user by ID.
    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserAccount>, RepositoryError>;

    /// List all users eligible for email delivery.
    async fn list_users(&self) -> Result<Vec<UserAccount>, RepositoryError>;
}
