//! Finnhub Market Data Adapter
//!
//! REST implementation of `MarketDataPort` against the Finnhub API. The API
//! key travels as the `token` query parameter.

pub mod adapter;
pub mod api_types;
pub mod cache;
pub mod config;
pub mod error;
pub mod http_client;

pub use adapter::FinnhubMarketDataAdapter;
pub use config::{CacheTtls, DEFAULT_BASE_URL, FinnhubConfig};
pub use error::FinnhubError;
pub use http_client::FinnhubHttpClient;
