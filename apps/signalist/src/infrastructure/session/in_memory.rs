//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::SessionPort;
use crate::domain::UserId;

/// Session tokens issued out of band, kept in memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, UserId>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` for `user_id`, replacing any previous owner.
    pub fn insert(&self, token: impl Into<String>, user_id: UserId) {
        self.sessions.write().insert(token.into(), user_id);
    }

    /// Revoke a token. Returns whether it existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }

    /// Number of active sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[async_trait]
impl SessionPort for InMemorySessionStore {
    async fn resolve(&self, token: &str) -> Option<UserId> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        self.sessions.read().get(token).cloned()
    }
}
