//! End-to-end tests for the REST API.
//!
//! The shipped adapters are wired exactly as in the binary, with Finnhub
//! served by a local mock server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use signalist::config::load_config_from_string;
use signalist::infrastructure::container::{Adapters, Container, DefaultAdapters};
use signalist::infrastructure::finnhub::FinnhubMarketDataAdapter;
use signalist::infrastructure::http::{AppState, JOB_TOKEN_HEADER, create_router};
use signalist::infrastructure::mailer::LogMailer;
use signalist::infrastructure::persistence::{
    InMemoryAlertRepository, InMemoryUserDirectory, InMemoryWatchlistRepository,
};
use signalist::infrastructure::retry::RetryPolicy;
use signalist::infrastructure::session::InMemorySessionStore;

const TOKEN: &str = "session-ada";
const OTHER_TOKEN: &str = "session-mallory";
const JOB_SECRET: &str = "job-secret";

async fn finnhub() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quote"))
        .and(query_param("symbol", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "c": 227.52, "dp": -0.84, "h": 229.1, "l": 226.0, "o": 228.0, "pc": 229.45
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stock/profile2"))
        .and(query_param("symbol", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Apple Inc", "ticker": "AAPL", "exchange": "NASDAQ", "marketCapitalization": 3450.0
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stock/metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metric": {"peBasicExclExtraTTM": 34.56}
        })))
        .mount(&server)
        .await;

    server
}

fn app(server: &MockServer) -> Router {
    let yaml = format!(
        r#"
finnhub:
  api_key: test-key
  base_url: "{}"
aggregator:
  batch_delay_ms: 0
jobs:
  trigger_token: {JOB_SECRET}
auth:
  sessions:
    - token: {TOKEN}
      user_id: ada
      email: ada@example.com
      name: Ada
    - token: {OTHER_TOKEN}
      user_id: mallory
      email: mallory@example.com
"#,
        server.uri()
    );
    let config = load_config_from_string(&yaml).unwrap();

    let finnhub = config
        .finnhub
        .to_adapter_config()
        .with_retry(RetryPolicy::immediate(1));

    let sessions = InMemorySessionStore::new();
    let users = InMemoryUserDirectory::new(Vec::new());
    for session in &config.auth.sessions {
        sessions.insert(session.token.clone(), session.account().id);
        users.upsert(session.account());
    }

    let adapters = Adapters::<DefaultAdapters> {
        market_data: Arc::new(FinnhubMarketDataAdapter::new(&finnhub).unwrap()),
        watchlist: Arc::new(InMemoryWatchlistRepository::new()),
        alerts: Arc::new(InMemoryAlertRepository::new()),
        users: Arc::new(users),
        sessions: Arc::new(sessions),
        mailer: Arc::new(LogMailer::new("Signalist <test@localhost>")),
    };

    create_router(
        AppState::new(Container::new(adapters, config.service_settings()))
            .with_job_token(&config.jobs.trigger_token),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn with_cookie(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, format!("signalist_session={TOKEN}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn unauthenticated_watchlist_is_rejected() {
    let server = finnhub().await;
    let app = app(&server);

    let (status, json) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/v1/watchlist")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"symbol": "AAPL", "company": "Apple", "user_id": "ada"}).to_string(),
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn watchlist_flow_with_formatted_records() {
    let server = finnhub().await;
    let app = app(&server);

    let (status, json) = send(
        &app,
        with_cookie(
            "POST",
            "/api/v1/watchlist",
            Some(json!({"symbol": " aapl ", "company": "Apple Inc"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true, "message": "Added to watchlist"}));

    let (_, json) = send(
        &app,
        with_cookie(
            "POST",
            "/api/v1/watchlist",
            Some(json!({"symbol": "AAPL", "company": "Apple Inc"})),
        ),
    )
    .await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Stock already in watchlist");

    let (status, json) = send(&app, with_cookie("GET", "/api/v1/watchlist", None)).await;
    assert_eq!(status, StatusCode::OK);
    let record = &json[0];
    assert_eq!(record["symbol"], "AAPL");
    assert_eq!(record["company"], "Apple Inc");
    assert_eq!(record["price_formatted"], "$227.52");
    assert_eq!(record["change_formatted"], "-0.84%");
    assert_eq!(record["market_cap"], "$3.45T");
    assert_eq!(record["pe_ratio"], "34.6");

    let (_, json) = send(&app, with_cookie("DELETE", "/api/v1/watchlist/aapl", None)).await;
    assert_eq!(json["message"], "Removed from watchlist");

    let (_, json) = send(&app, with_cookie("GET", "/api/v1/watchlist", None)).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn identity_comes_from_the_session() {
    let server = finnhub().await;
    let app = app(&server);

    send(
        &app,
        with_cookie(
            "POST",
            "/api/v1/alerts",
            Some(json!({"symbol": "AAPL", "company": "Apple Inc", "user_id": "mallory"})),
        ),
    )
    .await;

    let (_, json) = send(&app, with_cookie("GET", "/api/v1/alerts", None)).await;
    assert_eq!(json["symbols"], json!(["AAPL"]));

    let (_, json) = send(
        &app,
        Request::builder()
            .uri("/api/v1/alerts")
            .header(header::AUTHORIZATION, format!("Bearer {OTHER_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(json["symbols"], json!([]));
}

#[tokio::test]
async fn hourly_job_reports_delivery() {
    let server = finnhub().await;
    let app = app(&server);

    send(
        &app,
        with_cookie(
            "POST",
            "/api/v1/alerts",
            Some(json!({"symbol": "AAPL", "company": "Apple Inc"})),
        ),
    )
    .await;

    let (status, json) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/v1/jobs/hourly-alerts")
            .header(JOB_TOKEN_HEADER, JOB_SECRET)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["emails_sent"], 1);
    assert_eq!(json["alerts_marked"], 1);
}

#[tokio::test]
async fn anonymous_hourly_job_is_rejected_and_leaves_alerts_pending() {
    let server = finnhub().await;
    let app = app(&server);

    send(
        &app,
        with_cookie(
            "POST",
            "/api/v1/alerts",
            Some(json!({"symbol": "AAPL", "company": "Apple Inc"})),
        ),
    )
    .await;

    let (status, json) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/v1/jobs/hourly-alerts")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/v1/jobs/hourly-alerts")
            .header(JOB_TOKEN_HEADER, JOB_SECRET)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["alerts_marked"], 1);
}

#[tokio::test]
async fn snapshot_upstream_failure_is_not_found() {
    let server = finnhub().await;
    let app = app(&server);

    let (status, json) = send(
        &app,
        Request::builder()
            .uri("/api/v1/stocks/ZZZZ/snapshot")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
