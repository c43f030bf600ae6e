//! In-memory repositories.
//!
//! Entries are keyed by (user id, symbol), which is how the uniqueness
//! constraint is enforced. Listing keeps insertion order.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::application::ports::{
    AlertRepository, RepositoryError, UserDirectoryPort, WatchlistRepository,
};
use crate::domain::{Alert, Symbol, UserAccount, UserId, WatchlistItem};

type EntryKey = (UserId, Symbol);

/// Insertion-ordered map keyed by (user id, symbol).
#[derive(Debug)]
struct KeyedEntries<T> {
    order: Vec<EntryKey>,
    entries: HashMap<EntryKey, T>,
}

impl<T> Default for KeyedEntries<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> KeyedEntries<T> {
    fn insert(&mut self, key: EntryKey, value: T) -> Result<(), RepositoryError> {
        if self.entries.contains_key(&key) {
            return Err(RepositoryError::Duplicate {
                user_id: key.0.to_string(),
                symbol: key.1.to_string(),
            });
        }
        self.order.push(key.clone());
        self.entries.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &EntryKey) -> bool {
        if self.entries.remove(key).is_none() {
            return false;
        }
        self.order.retain(|k| k != key);
        true
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    fn by_user<'a>(&'a self, user_id: &'a UserId) -> impl Iterator<Item = &'a T> + 'a {
        self.order
            .iter()
            .filter(move |(owner, _)| owner == user_id)
            .filter_map(|key| self.entries.get(key))
    }
}

/// In-memory implementation of `WatchlistRepository`.
#[derive(Debug, Default)]
pub struct InMemoryWatchlistRepository {
    items: RwLock<KeyedEntries<WatchlistItem>>,
}

impl InMemoryWatchlistRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries across all users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().entries.len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().entries.is_empty()
    }
}

#[async_trait]
impl WatchlistRepository for InMemoryWatchlistRepository {
    async fn insert(&self, item: WatchlistItem) -> Result<(), RepositoryError> {
        let key = (item.user_id.clone(), item.symbol.clone());
        self.items.write().insert(key, item)
    }

    async fn find(
        &self,
        user_id: &UserId,
        symbol: &Symbol,
    ) -> Result<Option<WatchlistItem>, RepositoryError> {
        let key = (user_id.clone(), symbol.clone());
        Ok(self.items.read().entries.get(&key).cloned())
    }

    async fn delete(&self, user_id: &UserId, symbol: &Symbol) -> Result<bool, RepositoryError> {
        let key = (user_id.clone(), symbol.clone());
        Ok(self.items.write().remove(&key))
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<WatchlistItem>, RepositoryError> {
        Ok(self.items.read().by_user(user_id).cloned().collect())
    }
}

/// In-memory implementation of `AlertRepository`.
#[derive(Debug, Default)]
pub struct InMemoryAlertRepository {
    alerts: RwLock<KeyedEntries<Alert>>,
}

impl InMemoryAlertRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn insert(&self, alert: Alert) -> Result<(), RepositoryError> {
        let key = (alert.user_id.clone(), alert.symbol.clone());
        self.alerts.write().insert(key, alert)
    }

    async fn find(&self, user_id: &UserId, symbol: &Symbol) -> Result<Option<Alert>, RepositoryError> {
        let key = (user_id.clone(), symbol.clone());
        Ok(self.alerts.read().entries.get(&key).cloned())
    }

    async fn delete(&self, user_id: &UserId, symbol: &Symbol) -> Result<bool, RepositoryError> {
        let key = (user_id.clone(), symbol.clone());
        Ok(self.alerts.write().remove(&key))
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Alert>, RepositoryError> {
        Ok(self.alerts.read().by_user(user_id).cloned().collect())
    }

    async fn list_all(&self) -> Result<Vec<Alert>, RepositoryError> {
        Ok(self.alerts.read().values().cloned().collect())
    }

    async fn mark_sent(
        &self,
        user_id: &UserId,
        symbols: &[Symbol],
        at: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        let mut alerts = self.alerts.write();
        let mut updated = 0;
        for symbol in symbols {
            let key = (user_id.clone(), symbol.clone());
            if let Some(alert) = alerts.entries.get_mut(&key) {
                alert.last_sent_at = Some(at);
                updated += 1;
            }
        }
        Ok(updated)
    }
}

/// In-memory implementation of `UserDirectoryPort`.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<UserAccount>>,
}

impl InMemoryUserDirectory {
    /// Create a directory seeded with `users`.
    #[must_use]
    pub fn new(users: Vec<UserAccount>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Add or replace a user.
    pub fn upsert(&self, user: UserAccount) {
        let mut users = self.users.write();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user;
        } else {
            users.push(user);
        }
    }
}

#[async_trait]
impl UserDirectoryPort for InMemoryUserDirectory {
    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(self.users.read().iter().find(|u| &u.id == user_id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        Ok(self.users.read().clone())
    }
}
