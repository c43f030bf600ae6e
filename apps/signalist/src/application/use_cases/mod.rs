//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod aggregate_watchlist;
mod alert_actions;
mod batching;
mod deliver_alerts;
mod news_digest;
mod search_stocks;
mod select_news;
mod snapshots;
#[cfg(test)]
pub(crate) mod test_support;
mod watchlist_actions;

pub use aggregate_watchlist::MarketDataAggregator;
pub use alert_actions::AlertService;
pub use batching::BatchSettings;
pub use deliver_alerts::{AlertDeliveryReport, AlertDeliveryUseCase};
pub use news_digest::{NewsDigestReport, NewsDigestUseCase};
pub use search_stocks::{POPULAR_STOCK_SYMBOLS, SearchSettings, StockSearch};
pub use select_news::{NewsError, NewsSelector, NewsSettings, round_robin};
pub use snapshots::SnapshotReader;
pub use watchlist_actions::WatchlistService;
