//! Users, watchlist entries and alerts.
//!
//! Watchlist entries and alerts are unique per (user id, symbol); the
//! repositories enforce that constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Symbol;

/// Identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user ID.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered user, as needed by the email jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// A symbol on a user's watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistItem {
    /// Owner.
    pub user_id: UserId,
    /// Symbol.
    pub symbol: Symbol,
    /// Company name.
    pub company: String,
    /// When the entry was added.
    pub added_at: DateTime<Utc>,
}

impl WatchlistItem {
    /// Create an entry added now.
    #[must_use]
    pub fn new(user_id: UserId, symbol: Symbol, company: impl Into<String>) -> Self {
        Self {
            user_id,
            symbol,
            company: company.into().trim().to_string(),
            added_at: Utc::now(),
        }
    }
}

/// An hourly price alert for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert ID.
    pub id: Uuid,
    /// Owner.
    pub user_id: UserId,
    /// Symbol.
    pub symbol: Symbol,
    /// Company name.
    pub company: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last time an alert email including this symbol was sent.
    pub last_sent_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Create a new, never-sent alert.
    #[must_use]
    pub fn new(user_id: UserId, symbol: Symbol, company: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            symbol,
            company: company.into().trim().to_string(),
            created_at: Utc::now(),
            last_sent_at: None,
        }
    }
}
