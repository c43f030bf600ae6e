//! Periodic job runner.
//!
//! Each job runs on its own interval until the cancellation token fires. The
//! first run happens one full period after start; missed ticks are skipped.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Spawn `job` every `period` until `cancel` fires.
pub fn spawn_periodic<F, Fut>(
    name: &'static str,
    period: Duration,
    cancel: CancellationToken,
    job: F,
) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        interval.tick().await;

        tracing::info!(job = name, period_secs = period.as_secs(), "Scheduled job started");

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!(job = name, "Scheduled job stopped");
                    break;
                }
                _ = interval.tick() => {
                    tracing::info!(job = name, "Running scheduled job");
                    job().await;
                }
            }
        }
    })
}
