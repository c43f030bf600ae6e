//! Session Port (Driven Port)
//!
//! Resolves an opaque session token to the authenticated user. This is the
//! only source of user identity for watchlist and alert actions.

use async_trait::async_trait;

use crate::domain::UserId;

/// Port for session lookup.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Resolve a session token. Returns `None` for unknown or expired sessions.
    async fn resolve(&self, token: &str) -> Option<UserId>;
}
