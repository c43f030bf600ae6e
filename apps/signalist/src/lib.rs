// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Signalist - stock watchlist, price alert and market news service.
//!
//! # Architecture (Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Symbols, quotes, profiles, articles, watchlist entries and
//!   alerts, plus the display formatting rules.
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `MarketDataPort`, repositories, `SessionPort`, `MailerPort`
//!   - `use_cases`: watchlist aggregation, news selection, alert delivery,
//!     daily digest, search, watchlist/alert actions
//!   - `templates`: email bodies
//!
//! - **Infrastructure**: Adapters
//!   - `finnhub`: Finnhub REST client with retry and response cache
//!   - `persistence`, `session`, `mailer`: in-process adapters
//!   - `http`: axum REST API
//!   - `scheduler`: periodic jobs
//!
//! - **Config**: YAML configuration with environment interpolation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core types with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

pub use application::use_cases::{
    AlertDeliveryUseCase, MarketDataAggregator, NewsDigestUseCase, NewsSelector,
};
pub use domain::{Article, StockRecord, StockSnapshot, Symbol};
pub use infrastructure::container::{Container, DefaultAdapters};
pub use infrastructure::finnhub::{FinnhubConfig, FinnhubMarketDataAdapter};
pub use infrastructure::http::{AppState, create_router};
