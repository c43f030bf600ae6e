//! Response cache keyed by request path and query.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Default upper bound on stored entries.
pub const MAX_ENTRIES: usize = 1024;

/// Cached response body with fetch time.
#[derive(Debug, Clone)]
struct CachedResponse {
    body: serde_json::Value,
    fetched_at: Instant,
}

/// Thread-safe cache of decoded JSON responses.
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
    max_age: Duration,
    max_entries: usize,
}

impl ResponseCache {
    /// Create a cache whose entries are never kept longer than `max_age`.
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self::with_max_entries(max_age, MAX_ENTRIES)
    }

    /// Create a cache holding at most `max_entries` bodies (at least one).
    #[must_use]
    pub fn with_max_entries(max_age: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_age,
            max_entries: max_entries.max(1),
        }
    }

    /// Fresh body for `key`, if one was stored less than `ttl` ago.
    #[must_use]
    pub fn get(&self, key: &str, ttl: Duration) -> Option<serde_json::Value> {
        if ttl.is_zero() {
            return None;
        }
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < ttl)
            .map(|entry| entry.body.clone())
    }

    /// Store a body.
    ///
    /// A new key on a full cache first drops entries older than `max_age`,
    /// then evicts the oldest remaining entry.
    pub fn insert(&self, key: String, body: serde_json::Value) {
        let mut entries = self.entries.write();
        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let max_age = self.max_age;
            entries.retain(|_, entry| entry.fetched_at.elapsed() < max_age);

            while entries.len() >= self.max_entries {
                let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.fetched_at)
                    .map(|(key, _)| key.clone())
                else {
                    break;
                };
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            CachedResponse {
                body,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Cache key: path plus query pairs in request order.
#[must_use]
pub fn cache_key(path: &str, query: &[(&str, &str)]) -> String {
    let mut key = path.to_string();
    for (index, (name, value)) in query.iter().enumerate() {
        key.push(if index == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}
