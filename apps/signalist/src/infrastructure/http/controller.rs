//! HTTP Controller
//!
//! REST endpoints for watchlists, alerts, news, search and the scheduled jobs.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::domain::Symbol;
use crate::infrastructure::container::{AdapterSet, Container};

use super::auth::{AuthUser, JobToken, MaybeUser};
use super::request::{AddStockRequest, NewsQuery, SearchQuery};
use super::response::{AlertSymbolsResponse, ApiError, HealthResponse};

/// Application state shared across handlers.
pub struct AppState<P: AdapterSet> {
    /// Wired use cases.
    pub container: Container<P>,
    /// Service version.
    pub version: String,
    /// Secret required to trigger jobs over HTTP; `None` disables the routes.
    pub job_token: Option<Arc<str>>,
}

impl<P: AdapterSet> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            version: self.version.clone(),
            job_token: self.job_token.clone(),
        }
    }
}

impl<P: AdapterSet> AppState<P> {
    /// Create new application state.
    #[must_use]
    pub fn new(container: Container<P>) -> Self {
        Self {
            container,
            version: env!("CARGO_PKG_VERSION").to_string(),
            job_token: None,
        }
    }

    /// Accept job triggers carrying `token`. A blank token keeps them disabled.
    #[must_use]
    pub fn with_job_token(mut self, token: &str) -> Self {
        let token = token.trim();
        self.job_token = (!token.is_empty()).then(|| Arc::from(token));
        self
    }
}

/// Create the HTTP router.
pub fn create_router<P: AdapterSet>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health_check::<P>))
        .route(
            "/api/v1/watchlist",
            get(list_watchlist::<P>).post(add_to_watchlist::<P>),
        )
        .route("/api/v1/watchlist/{symbol}", delete(remove_from_watchlist::<P>))
        .route("/api/v1/alerts", get(list_alerts::<P>).post(add_alert::<P>))
        .route("/api/v1/alerts/{symbol}", delete(remove_alert::<P>))
        .route("/api/v1/news", get(news::<P>))
        .route("/api/v1/search", get(search::<P>))
        .route("/api/v1/stocks/{symbol}/snapshot", get(snapshot::<P>))
        .route("/api/v1/jobs/hourly-alerts", post(run_hourly_alerts::<P>))
        .route("/api/v1/jobs/daily-news", post(run_daily_news::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check<P: AdapterSet>(State(state): State<AppState<P>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn list_watchlist<P: AdapterSet>(
    State(state): State<AppState<P>>,
    AuthUser(user_id): AuthUser,
) -> impl IntoResponse {
    let symbols = state.container.watchlist.symbols(&user_id).await;
    Json(state.container.aggregator.stock_records(&symbols).await)
}

async fn add_to_watchlist<P: AdapterSet>(
    State(state): State<AppState<P>>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<AddStockRequest>,
) -> impl IntoResponse {
    Json(
        state
            .container
            .watchlist
            .add(&user_id, &request.symbol, &request.company)
            .await,
    )
}

async fn remove_from_watchlist<P: AdapterSet>(
    State(state): State<AppState<P>>,
    AuthUser(user_id): AuthUser,
    Path(symbol): Path<String>,
) -> impl IntoResponse {
    Json(state.container.watchlist.remove(&user_id, &symbol).await)
}

async fn list_alerts<P: AdapterSet>(
    State(state): State<AppState<P>>,
    AuthUser(user_id): AuthUser,
) -> impl IntoResponse {
    Json(AlertSymbolsResponse {
        symbols: state.container.alerts.symbols(&user_id).await,
    })
}

async fn add_alert<P: AdapterSet>(
    State(state): State<AppState<P>>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<AddStockRequest>,
) -> impl IntoResponse {
    Json(
        state
            .container
            .alerts
            .add(&user_id, &request.symbol, &request.company)
            .await,
    )
}

async fn remove_alert<P: AdapterSet>(
    State(state): State<AppState<P>>,
    AuthUser(user_id): AuthUser,
    Path(symbol): Path<String>,
) -> impl IntoResponse {
    Json(state.container.alerts.remove(&user_id, &symbol).await)
}

async fn news<P: AdapterSet>(
    State(state): State<AppState<P>>,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let symbols = query.symbols();
    match state.container.news.select(&symbols).await {
        Ok(articles) => Ok(Json(articles)),
        Err(e) => {
            tracing::error!(error = %e, "News selection failed");
            Err(ApiError::upstream(e.to_string()))
        }
    }
}

async fn search<P: AdapterSet>(
    State(state): State<AppState<P>>,
    MaybeUser(user_id): MaybeUser,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    Json(
        state
            .container
            .search
            .search(&query.q, user_id.as_ref())
            .await,
    )
}

async fn snapshot<P: AdapterSet>(
    State(state): State<AppState<P>>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = Symbol::parse(&symbol).map_err(|e| ApiError::not_found(e.to_string()))?;
    state
        .container
        .snapshots
        .snapshot(&symbol)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No quote available for {symbol}")))
}

async fn run_hourly_alerts<P: AdapterSet>(
    State(state): State<AppState<P>>,
    _: JobToken,
) -> impl IntoResponse {
    Json(state.container.alert_delivery.execute().await)
}

async fn run_daily_news<P: AdapterSet>(
    State(state): State<AppState<P>>,
    _: JobToken,
) -> impl IntoResponse {
    Json(state.container.news_digest.execute().await)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::super::auth::JOB_TOKEN_HEADER;
    use super::*;
    use crate::application::use_cases::test_support::{MockMarketData, RecordingMailer, article};
    use crate::domain::{UserAccount, UserId};
    use crate::infrastructure::container::{Adapters, ServiceSettings};
    use crate::infrastructure::persistence::{
        InMemoryAlertRepository, InMemoryUserDirectory, InMemoryWatchlistRepository,
    };
    use crate::infrastructure::session::InMemorySessionStore;

    struct TestAdapters;

    impl AdapterSet for TestAdapters {
        type MarketData = MockMarketData;
        type Watchlist = InMemoryWatchlistRepository;
        type Alerts = InMemoryAlertRepository;
        type Users = InMemoryUserDirectory;
        type Sessions = InMemorySessionStore;
        type Mailer = RecordingMailer;
    }

    const TOKEN: &str = "tok-alice";
    const JOB_SECRET: &str = "job-secret";

    fn router(market_data: MockMarketData) -> Router {
        let sessions = InMemorySessionStore::new();
        sessions.insert(TOKEN, UserId::new("alice"));
        let users = InMemoryUserDirectory::new(vec![UserAccount {
            id: UserId::new("alice"),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        }]);

        let adapters = Adapters::<TestAdapters> {
            market_data: Arc::new(market_data),
            watchlist: Arc::new(InMemoryWatchlistRepository::new()),
            alerts: Arc::new(InMemoryAlertRepository::new()),
            users: Arc::new(users),
            sessions: Arc::new(sessions),
            mailer: Arc::new(RecordingMailer::new()),
        };
        create_router(
            AppState::new(Container::new(adapters, ServiceSettings::default()))
                .with_job_token(JOB_SECRET),
        )
    }

    fn job_request(uri: &str, secret: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method("POST").uri(uri);
        let builder = match secret {
            Some(secret) => builder.header(JOB_TOKEN_HEADER, secret),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn authed(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = router(MockMarketData::new());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn watchlist_requires_session() {
        let app = router(MockMarketData::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/watchlist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let app = router(MockMarketData::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/alerts")
                    .header(header::AUTHORIZATION, "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn add_then_list_watchlist() {
        let app = router(
            MockMarketData::new()
                .with_quote("AAPL", 190.0, 1.25)
                .with_profile("AAPL", "Apple Inc", 2950.0),
        );

        let response = app
            .clone()
            .oneshot(authed(
                "POST",
                "/api/v1/watchlist",
                Some(serde_json::json!({"symbol": "aapl", "company": "Apple Inc"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Added to watchlist");

        let response = app
            .oneshot(authed("GET", "/api/v1/watchlist", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["symbol"], "AAPL");
    }

    #[tokio::test]
    async fn remove_missing_alert_reports_failure() {
        let app = router(MockMarketData::new());
        let response = app
            .oneshot(authed("DELETE", "/api/v1/alerts/TSLA", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Alert not found");
    }

    #[tokio::test]
    async fn alerts_list_returns_symbols() {
        let app = router(MockMarketData::new());
        app.clone()
            .oneshot(authed(
                "POST",
                "/api/v1/alerts",
                Some(serde_json::json!({"symbol": "msft", "company": "Microsoft"})),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(authed("GET", "/api/v1/alerts", None))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["symbols"], serde_json::json!(["MSFT"]));
    }

    #[tokio::test]
    async fn snapshot_unknown_symbol_is_404() {
        let app = router(MockMarketData::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/stocks/ZZZZ/snapshot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn snapshot_known_symbol() {
        let app = router(MockMarketData::new().with_quote("NVDA", 120.0, -2.0));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/stocks/nvda/snapshot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["symbol"], "NVDA");
    }

    #[tokio::test]
    async fn news_failure_is_bad_gateway() {
        let app = router(MockMarketData::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/news")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn news_for_symbols() {
        let app = router(
            MockMarketData::new().with_company_news("AAPL", vec![article(1, "Apple ships", 100)]),
        );
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/news?symbols=aapl")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn hourly_job_without_alerts() {
        let app = router(MockMarketData::new());
        let response = app
            .oneshot(job_request("/api/v1/jobs/hourly-alerts", Some(JOB_SECRET)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "No alerts found");
    }

    #[derive(Clone, Default)]
    struct SpanTargets(Arc<parking_lot::Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanTargets {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _: &tracing::span::Id,
            _: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.lock().push(attrs.metadata().target().to_string());
        }
    }

    #[tokio::test]
    async fn requests_open_tower_http_spans() {
        use tracing_subscriber::layer::SubscriberExt;

        let targets = SpanTargets::default();
        let subscriber = tracing_subscriber::registry().with(targets.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = router(MockMarketData::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(targets.0.lock().iter().any(|t| t.starts_with("tower_http")));
    }

    #[tokio::test]
    async fn anonymous_job_trigger_is_rejected() {
        let app = router(MockMarketData::new());
        for uri in ["/api/v1/jobs/hourly-alerts", "/api/v1/jobs/daily-news"] {
            let response = app.clone().oneshot(job_request(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            let json = body_json(response).await;
            assert_eq!(json["code"], "UNAUTHORIZED");
        }
    }

    #[tokio::test]
    async fn wrong_job_secret_is_rejected() {
        let app = router(MockMarketData::new());
        let response = app
            .oneshot(job_request("/api/v1/jobs/daily-news", Some("job-secreT")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn job_routes_are_closed_without_a_configured_secret() {
        let adapters = Adapters::<TestAdapters> {
            market_data: Arc::new(MockMarketData::new()),
            watchlist: Arc::new(InMemoryWatchlistRepository::new()),
            alerts: Arc::new(InMemoryAlertRepository::new()),
            users: Arc::new(InMemoryUserDirectory::new(Vec::new())),
            sessions: Arc::new(InMemorySessionStore::new()),
            mailer: Arc::new(RecordingMailer::new()),
        };
        let app = create_router(
            AppState::new(Container::new(adapters, ServiceSettings::default()))
                .with_job_token("  "),
        );

        let response = app
            .oneshot(job_request("/api/v1/jobs/hourly-alerts", Some("")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
