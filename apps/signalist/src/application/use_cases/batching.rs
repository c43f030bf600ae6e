//! Sequential batches of concurrent calls.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// How many upstream calls run at once and how long to pause between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Items processed concurrently per round (minimum 1).
    pub batch_size: usize,
    /// Pause between rounds; not applied after the last one.
    pub batch_delay: Duration,
}

impl BatchSettings {
    /// Watchlist aggregation: 5 symbols per round, 100ms apart.
    pub const WATCHLIST: Self = Self {
        batch_size: 5,
        batch_delay: Duration::from_millis(100),
    };

    /// Alert snapshots: 8 symbols per round, 100ms apart.
    pub const SNAPSHOTS: Self = Self {
        batch_size: 8,
        batch_delay: Duration::from_millis(100),
    };

    /// Create batch settings.
    #[must_use]
    pub const fn new(batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            batch_size,
            batch_delay,
        }
    }
}

/// Run `task` over `items` in sequential batches.
///
/// Results are returned in input order regardless of completion order.
pub(crate) async fn run_in_batches<'a, T, R, F, Fut>(
    items: &'a [T],
    settings: BatchSettings,
    mut task: F,
) -> Vec<R>
where
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = R>,
{
    let batch_size = settings.batch_size.max(1);
    let batch_count = items.len().div_ceil(batch_size);
    let mut results = Vec::with_capacity(items.len());

    for (index, batch) in items.chunks(batch_size).enumerate() {
        let batch_results = join_all(batch.iter().map(&mut task)).await;
        results.extend(batch_results);

        if index + 1 < batch_count && !settings.batch_delay.is_zero() {
            tokio::time::sleep(settings.batch_delay).await;
        }
    }

    results
}
