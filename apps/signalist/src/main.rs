//! Signalist Binary
//!
//! Starts the REST API and the scheduled alert and news jobs.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p signalist
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `FINNHUB_API_KEY`: Market data API key (referenced from `config.yaml`)
//!
//! ## Optional
//! - `SIGNALIST_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter (default: `signalist=info,tower_http=info`)
//! - `SIGNALIST_JOB_TOKEN`: `X-Job-Token` secret for the job routes (unset disables them)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use signalist::application::use_cases::{AlertDeliveryUseCase, NewsDigestUseCase};
use signalist::config::{Config, LoggingConfig, load_config};
use signalist::infrastructure::container::{Adapters, Container, DefaultAdapters};
use signalist::infrastructure::finnhub::FinnhubMarketDataAdapter;
use signalist::infrastructure::http::{AppState, create_router};
use signalist::infrastructure::mailer::LogMailer;
use signalist::infrastructure::persistence::{
    InMemoryAlertRepository, InMemoryUserDirectory, InMemoryWatchlistRepository,
};
use signalist::infrastructure::scheduler::spawn_periodic;
use signalist::infrastructure::session::InMemorySessionStore;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Time allowed for scheduled jobs to wind down.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_config(None).context("failed to load configuration")?;
    init_tracing(&config.observability.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.server.bind_address(),
        "Starting Signalist"
    );

    let container = create_container(&config)?;
    let shutdown_token = CancellationToken::new();
    let jobs = start_jobs(&config, &container, &shutdown_token);

    if config.jobs.trigger_token.trim().is_empty() {
        tracing::info!("jobs.trigger_token is empty; job trigger routes are disabled");
    }
    let app = create_router(AppState::new(container).with_job_token(&config.jobs.trigger_token));
    let listener = TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?;

    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health");
    tracing::info!("  GET    /api/v1/watchlist");
    tracing::info!("  POST   /api/v1/watchlist");
    tracing::info!("  DELETE /api/v1/watchlist/{{symbol}}");
    tracing::info!("  GET    /api/v1/alerts");
    tracing::info!("  POST   /api/v1/alerts");
    tracing::info!("  DELETE /api/v1/alerts/{{symbol}}");
    tracing::info!("  GET    /api/v1/news");
    tracing::info!("  GET    /api/v1/search");
    tracing::info!("  GET    /api/v1/stocks/{{symbol}}/snapshot");
    tracing::info!("  POST   /api/v1/jobs/hourly-alerts");
    tracing::info!("  POST   /api/v1/jobs/daily-news");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_token.clone()))
        .await
        .context("HTTP server error")?;

    shutdown_token.cancel();
    await_jobs(jobs).await;

    tracing::info!("Signalist stopped");
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&logging.filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(logging.ansi)
        .init();
}

/// Build adapters from config and wire the use cases.
fn create_container(config: &Config) -> anyhow::Result<Container<DefaultAdapters>> {
    let finnhub_config = config.finnhub.to_adapter_config();
    let market_data = FinnhubMarketDataAdapter::new(&finnhub_config)
        .context("failed to create Finnhub client")?;

    tracing::info!(
        base_url = %finnhub_config.base_url,
        max_attempts = finnhub_config.retry.max_attempts,
        "Finnhub client initialized"
    );

    let sessions = InMemorySessionStore::new();
    let users = InMemoryUserDirectory::new(Vec::new());
    for session in &config.auth.sessions {
        let account = session.account();
        sessions.insert(session.token.trim(), account.id.clone());
        users.upsert(account);
    }
    tracing::info!(sessions = sessions.len(), "Sessions loaded");

    let adapters = Adapters::<DefaultAdapters> {
        market_data: Arc::new(market_data),
        watchlist: Arc::new(InMemoryWatchlistRepository::new()),
        alerts: Arc::new(InMemoryAlertRepository::new()),
        users: Arc::new(users),
        sessions: Arc::new(sessions),
        mailer: Arc::new(LogMailer::new(config.mail.sender.clone())),
    };

    Ok(Container::new(adapters, config.service_settings()))
}

/// Start the enabled scheduled jobs.
fn start_jobs(
    config: &Config,
    container: &Container<DefaultAdapters>,
    shutdown: &CancellationToken,
) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::new();

    if config.jobs.hourly_alerts.enabled {
        let alert_delivery = Arc::clone(&container.alert_delivery);
        handles.push(spawn_periodic(
            "hourly-alerts",
            config.jobs.hourly_alerts.interval(),
            shutdown.clone(),
            move || run_alert_delivery(Arc::clone(&alert_delivery)),
        ));
    }

    if config.jobs.daily_news.enabled {
        let news_digest = Arc::clone(&container.news_digest);
        handles.push(spawn_periodic(
            "daily-news",
            config.jobs.daily_news.interval(),
            shutdown.clone(),
            move || run_news_digest(Arc::clone(&news_digest)),
        ));
    }

    handles
}

type DefaultAlertDelivery = AlertDeliveryUseCase<
    InMemoryAlertRepository,
    InMemoryUserDirectory,
    FinnhubMarketDataAdapter,
    LogMailer,
>;

type DefaultNewsDigest = NewsDigestUseCase<
    InMemoryUserDirectory,
    InMemoryWatchlistRepository,
    FinnhubMarketDataAdapter,
    LogMailer,
>;

async fn run_alert_delivery(use_case: Arc<DefaultAlertDelivery>) {
    let report = use_case.execute().await;
    tracing::info!(
        success = report.success,
        users = report.users,
        sent = report.emails_sent,
        failed = report.emails_failed,
        "{}",
        report.message
    );
}

async fn run_news_digest(use_case: Arc<DefaultNewsDigest>) {
    let report = use_case.execute().await;
    tracing::info!(
        success = report.success,
        users = report.users,
        sent = report.emails_sent,
        failed = report.emails_failed,
        "{}",
        report.message
    );
}

/// Wait for jobs to observe cancellation, up to the shutdown timeout.
async fn await_jobs(jobs: Vec<JoinHandle<()>>) {
    let all = futures::future::join_all(jobs);
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, all).await.is_err() {
        tracing::warn!(
            timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
            "Scheduled jobs did not stop in time"
        );
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT), or for the token to fire.
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
        () = shutdown.cancelled() => {}
    }

    shutdown.cancel();
}
