//! Stock Snapshot Use Case
//!
//! Quote-only lookups used by alert emails and the snapshot endpoint.

use std::sync::Arc;

use crate::application::ports::MarketDataPort;
use crate::domain::{StockSnapshot, Symbol};

use super::batching::{BatchSettings, run_in_batches};

/// Use case for reading current quote snapshots.
pub struct SnapshotReader<M>
where
    M: MarketDataPort,
{
    market_data: Arc<M>,
    settings: BatchSettings,
}

impl<M> SnapshotReader<M>
where
    M: MarketDataPort,
{
    /// Create a snapshot reader with the given batching.
    pub const fn new(market_data: Arc<M>, settings: BatchSettings) -> Self {
        Self {
            market_data,
            settings,
        }
    }

    /// Snapshot of a single symbol, `None` when the quote is unavailable.
    pub async fn snapshot(&self, symbol: &Symbol) -> Option<StockSnapshot> {
        match self.market_data.quote(symbol).await {
            Ok(quote) => Some(StockSnapshot::from(quote)),
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Snapshot unavailable");
                None
            }
        }
    }

    /// Snapshots for many symbols in input order; failed symbols are omitted.
    pub async fn snapshots(&self, symbols: &[Symbol]) -> Vec<StockSnapshot> {
        run_in_batches(symbols, self.settings, |symbol| self.snapshot(symbol))
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::use_cases::test_support::MockMarketData;

    #[tokio::test]
    async fn omits_failed_symbols() {
        let market_data = MockMarketData::new()
            .with_quote("AAPL", 190.0, 1.0)
            .with_quote("TSLA", 250.0, -2.0);
        let reader = SnapshotReader::new(Arc::new(market_data), BatchSettings::new(8, Duration::ZERO));

        let symbols = [Symbol::new("AAPL"), Symbol::new("NOPE"), Symbol::new("TSLA")];
        let snapshots = reader.snapshots(&symbols).await;

        let found: Vec<&str> = snapshots.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(found, vec!["AAPL", "TSLA"]);
        assert!((snapshots[1].change_percent + 2.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn single_snapshot_copies_quote_fields() {
        let market_data = MockMarketData::new().with_quote("AMD", 100.0, 0.5);
        let reader = SnapshotReader::new(Arc::new(market_data), BatchSettings::SNAPSHOTS);

        let snapshot = reader.snapshot(&Symbol::new("amd")).await.unwrap();
        assert!((snapshot.price - 100.0).abs() < f64::EPSILON);
        assert!((snapshot.high - 101.0).abs() < f64::EPSILON);
        assert!((snapshot.previous_close - 99.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn unknown_symbol_has_no_snapshot() {
        let reader = SnapshotReader::new(Arc::new(MockMarketData::new()), BatchSettings::SNAPSHOTS);
        assert!(reader.snapshot(&Symbol::new("NOPE")).await.is_none());
    }
}
