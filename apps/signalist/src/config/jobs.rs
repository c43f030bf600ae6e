//! Scheduled job configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A periodic job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JobSchedule {
    /// Whether the job runs on its own.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between runs.
    pub interval_secs: u64,
}

impl JobSchedule {
    /// Interval as a duration.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Scheduled jobs.
#[derive(Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Hourly price alert emails.
    #[serde(default = "default_hourly_alerts")]
    pub hourly_alerts: JobSchedule,
    /// Daily news digest emails.
    #[serde(default = "default_daily_news")]
    pub daily_news: JobSchedule,
    /// Secret for `X-Job-Token` on the job trigger routes; empty disables them.
    #[serde(default)]
    pub trigger_token: String,
}

impl std::fmt::Debug for JobsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobsConfig")
            .field("hourly_alerts", &self.hourly_alerts)
            .field("daily_news", &self.daily_news)
            .field("trigger_token", &"***")
            .finish()
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            hourly_alerts: default_hourly_alerts(),
            daily_news: default_daily_news(),
            trigger_token: String::new(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_hourly_alerts() -> JobSchedule {
    JobSchedule {
        enabled: true,
        interval_secs: 60 * 60,
    }
}

const fn default_daily_news() -> JobSchedule {
    JobSchedule {
        enabled: true,
        interval_secs: 24 * 60 * 60,
    }
}
