//! Watchlist Market Data Aggregation Use Case
//!
//! Turns an ordered list of symbols into display-ready stock records. Each
//! symbol needs three upstream calls (quote, profile, basic financials) which
//! run concurrently; symbols are processed in rate-limit friendly batches.
//! Upstream failures never fail the batch, each part falls back on its own.

use std::sync::Arc;

use crate::application::ports::MarketDataPort;
use crate::domain::{Financials, Profile, Quote, StockRecord, Symbol};

use super::batching::{BatchSettings, run_in_batches};

/// Use case for building formatted stock records.
pub struct MarketDataAggregator<M>
where
    M: MarketDataPort,
{
    market_data: Arc<M>,
    settings: BatchSettings,
}

impl<M> MarketDataAggregator<M>
where
    M: MarketDataPort,
{
    /// Create an aggregator with the given batching.
    pub const fn new(market_data: Arc<M>, settings: BatchSettings) -> Self {
        Self {
            market_data,
            settings,
        }
    }

    /// Build one record per symbol, in input order.
    pub async fn stock_records(&self, symbols: &[Symbol]) -> Vec<StockRecord> {
        if symbols.is_empty() {
            return Vec::new();
        }

        tracing::debug!(
            symbols = symbols.len(),
            batch_size = self.settings.batch_size,
            "Aggregating watchlist market data"
        );

        run_in_batches(symbols, self.settings, |symbol| self.stock_record(symbol)).await
    }

    async fn stock_record(&self, symbol: &Symbol) -> StockRecord {
        let (quote, profile, financials) = tokio::join!(
            self.market_data.quote(symbol),
            self.market_data.profile(symbol),
            self.market_data.financials(symbol),
        );

        if quote.is_err() && profile.is_err() && financials.is_err() {
            tracing::warn!(symbol = %symbol, "All market data fetches failed");
            return StockRecord::unavailable(symbol.clone());
        }

        let quote = quote.unwrap_or_else(|e| {
            tracing::debug!(symbol = %symbol, error = %e, "Quote unavailable");
            Quote::zeroed(symbol.clone())
        });
        let profile = profile.unwrap_or_else(|e| {
            tracing::debug!(symbol = %symbol, error = %e, "Profile unavailable");
            Profile::fallback(symbol.clone())
        });
        let financials = financials.unwrap_or_else(|e| {
            tracing::debug!(symbol = %symbol, error = %e, "Financials unavailable");
            Financials::empty(symbol.clone())
        });

        StockRecord::from_parts(symbol.clone(), &quote, &profile, &financials)
    }
}
