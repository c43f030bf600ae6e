//! Service configuration.
//!
//! Loaded from a YAML file with `${VAR}` / `${VAR:-default}` interpolation,
//! then validated before anything is constructed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use signalist::config::load_config;
//!
//! // SIGNALIST_CONFIG, falling back to config.yaml
//! let config = load_config(None)?;
//! println!("port: {}", config.server.port);
//! ```

mod accounts;
mod finnhub;
mod jobs;
mod observability;
mod server;
mod services;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use accounts::{AuthConfig, MailConfig, StaticSession};
pub use finnhub::FinnhubSettings;
pub use jobs::{JobSchedule, JobsConfig};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use server::ServerConfig;
pub use services::{AggregatorConfig, NewsConfig, SearchConfig, SnapshotsConfig};

use crate::infrastructure::container::ServiceSettings;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "SIGNALIST_CONFIG";

/// Config file used when nothing else is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server.
    #[serde(default)]
    pub server: ServerConfig,
    /// Market data provider.
    #[serde(default)]
    pub finnhub: FinnhubSettings,
    /// Watchlist aggregation batching.
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    /// Alert snapshot batching.
    #[serde(default)]
    pub snapshots: SnapshotsConfig,
    /// News selection.
    #[serde(default)]
    pub news: NewsConfig,
    /// Symbol search.
    #[serde(default)]
    pub search: SearchConfig,
    /// Scheduled jobs.
    #[serde(default)]
    pub jobs: JobsConfig,
    /// Outgoing mail.
    #[serde(default)]
    pub mail: MailConfig,
    /// Seeded sessions.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Use case tunables.
    #[must_use]
    pub fn service_settings(&self) -> ServiceSettings {
        services::service_settings(&self.aggregator, &self.snapshots, &self.news, &self.search)
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// Without an explicit `path`, `SIGNALIST_CONFIG` is used, then `config.yaml`.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(
        || std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        str::to_string,
    );

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become empty strings.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(value)) if !value.is_empty() => value,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.finnhub.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "finnhub.api_key is required (set FINNHUB_API_KEY)".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }

    if config.finnhub.retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "finnhub.retry.max_attempts must be at least 1".to_string(),
        ));
    }

    if config.aggregator.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "aggregator.batch_size must be at least 1".to_string(),
        ));
    }

    if config.snapshots.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "snapshots.batch_size must be at least 1".to_string(),
        ));
    }

    if config.news.lookback_days < 0 {
        return Err(ConfigError::ValidationError(
            "news.lookback_days must not be negative".to_string(),
        ));
    }

    for (name, job) in [
        ("hourly_alerts", &config.jobs.hourly_alerts),
        ("daily_news", &config.jobs.daily_news),
    ] {
        if job.enabled && job.interval_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "jobs.{name}.interval_secs must be positive"
            )));
        }
    }

    if let Some(session) = config
        .auth
        .sessions
        .iter()
        .find(|s| s.token.trim().is_empty() || s.user_id.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(format!(
            "auth.sessions entry for '{}' needs both token and user_id",
            session.email
        )));
    }

    Ok(())
}
