//! Batching, news and search tunables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::use_cases::{BatchSettings, NewsSettings, SearchSettings};
use crate::infrastructure::container::ServiceSettings;

/// Watchlist aggregation batching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Symbols fetched concurrently per batch.
    pub batch_size: usize,
    /// Pause between batches in milliseconds.
    pub batch_delay_ms: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            batch_size: BatchSettings::WATCHLIST.batch_size,
            batch_delay_ms: 100,
        }
    }
}

/// Alert snapshot batching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotsConfig {
    /// Symbols fetched concurrently per batch.
    pub batch_size: usize,
    /// Pause between batches in milliseconds.
    pub batch_delay_ms: u64,
}

impl Default for SnapshotsConfig {
    fn default() -> Self {
        Self {
            batch_size: BatchSettings::SNAPSHOTS.batch_size,
            batch_delay_ms: 100,
        }
    }
}

/// News selection limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Articles returned per selection.
    pub max_articles: usize,
    /// Days of company news to look back.
    pub lookback_days: i64,
    /// General articles scanned for the fallback.
    pub general_scan_limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        let defaults = NewsSettings::default();
        Self {
            max_articles: defaults.max_articles,
            lookback_days: defaults.lookback_days,
            general_scan_limit: defaults.general_scan_limit,
        }
    }
}

/// Search limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Popular symbols listed for an empty query.
    pub popular_count: usize,
    /// Pause between popular profile lookups in milliseconds.
    pub popular_delay_ms: u64,
    /// Maximum results.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            popular_count: 10,
            popular_delay_ms: 100,
            max_results: 15,
        }
    }
}

/// Build use case settings from the individual sections.
#[must_use]
pub fn service_settings(
    aggregator: &AggregatorConfig,
    snapshots: &SnapshotsConfig,
    news: &NewsConfig,
    search: &SearchConfig,
) -> ServiceSettings {
    ServiceSettings {
        watchlist_batch: BatchSettings::new(
            aggregator.batch_size,
            Duration::from_millis(aggregator.batch_delay_ms),
        ),
        snapshot_batch: BatchSettings::new(
            snapshots.batch_size,
            Duration::from_millis(snapshots.batch_delay_ms),
        ),
        news: NewsSettings {
            max_articles: news.max_articles,
            lookback_days: news.lookback_days,
            general_scan_limit: news.general_scan_limit,
        },
        search: SearchSettings {
            popular_count: search.popular_count,
            popular_delay: Duration::from_millis(search.popular_delay_ms),
            max_results: search.max_results,
        },
    }
}
