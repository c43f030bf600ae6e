//! Market data value objects and display formatting.
//!
//! Quotes, profiles and financials arrive from the market data port with
//! missing fields already defaulted to zero. [`StockRecord`] is the
//! display-ready projection the watchlist page renders; it is derived per
//! request and never stored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Symbol;

/// Placeholder rendered for values that are missing or zero.
pub const NOT_AVAILABLE: &str = "N/A";

/// Preferred P/E metric: trailing twelve months, basic, excluding extraordinary items.
pub const PE_TTM_METRIC: &str = "peBasicExclExtraTTM";

/// Fallback P/E metric: normalized annual.
pub const PE_NORMALIZED_METRIC: &str = "peNormalizedAnnual";

/// Market capitalisation (in millions) from which the trillion tier applies.
const TRILLION_TIER_MILLIONS: f64 = 1000.0;

/// Point-in-time quote for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol.
    pub symbol: Symbol,
    /// Current price.
    pub current: f64,
    /// Percent change since previous close.
    pub change_percent: f64,
    /// Day high.
    pub high: f64,
    /// Day low.
    pub low: f64,
    /// Day open.
    pub open: f64,
    /// Previous close.
    pub previous_close: f64,
}

impl Quote {
    /// Zeroed quote used when the upstream fetch fails.
    #[must_use]
    pub fn zeroed(symbol: Symbol) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }
}

/// Company profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Symbol.
    pub symbol: Symbol,
    /// Company name (may be empty).
    pub name: String,
    /// Ticker as reported by the provider.
    pub ticker: String,
    /// Listing exchange.
    pub exchange: String,
    /// Market capitalisation in millions.
    pub market_capitalization: f64,
}

impl Profile {
    /// Fallback profile: the symbol stands in for the company name.
    #[must_use]
    pub fn fallback(symbol: Symbol) -> Self {
        Self {
            name: symbol.as_str().to_string(),
            symbol,
            ..Self::default()
        }
    }
}

/// Basic financial metrics keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    /// Symbol.
    pub symbol: Symbol,
    /// Numeric metrics.
    pub metric: HashMap<String, f64>,
}

impl Financials {
    /// Empty metrics used when the upstream fetch fails.
    #[must_use]
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            metric: HashMap::new(),
        }
    }

    /// Resolve the P/E ratio.
    ///
    /// Zero counts as missing, so a zero TTM value falls through to the
    /// normalized annual value.
    #[must_use]
    pub fn pe_ratio(&self) -> Option<f64> {
        [PE_TTM_METRIC, PE_NORMALIZED_METRIC]
            .iter()
            .filter_map(|name| self.metric.get(*name).copied())
            .find(|value| *value != 0.0 && value.is_finite())
    }
}

/// Display-ready stock record for one watchlist symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Symbol.
    pub symbol: Symbol,
    /// Company name.
    pub company: String,
    /// Raw current price.
    pub current_price: f64,
    /// Raw percent change.
    pub change_percent: f64,
    /// Price as `$X.XX`, or `N/A`.
    pub price_formatted: String,
    /// Change as `+X.XX%` / `-X.XX%`, or `N/A`.
    pub change_formatted: String,
    /// Market cap with `T`/`B` suffix, or `N/A`.
    pub market_cap: String,
    /// P/E ratio with one decimal, or `N/A`.
    pub pe_ratio: String,
}

impl StockRecord {
    /// Build a record from the three independently fetched parts.
    #[must_use]
    pub fn from_parts(
        symbol: Symbol,
        quote: &Quote,
        profile: &Profile,
        financials: &Financials,
    ) -> Self {
        let company = if profile.name.trim().is_empty() {
            symbol.as_str().to_string()
        } else {
            profile.name.clone()
        };

        Self {
            company,
            current_price: quote.current,
            change_percent: quote.change_percent,
            price_formatted: format_price(quote.current),
            change_formatted: format_change(quote.change_percent),
            market_cap: format_market_cap(profile.market_capitalization),
            pe_ratio: format_pe_ratio(financials.pe_ratio()),
            symbol,
        }
    }

    /// Placeholder record for a symbol whose data could not be built at all.
    #[must_use]
    pub fn unavailable(symbol: Symbol) -> Self {
        Self {
            company: symbol.as_str().to_string(),
            symbol,
            current_price: 0.0,
            change_percent: 0.0,
            price_formatted: NOT_AVAILABLE.to_string(),
            change_formatted: NOT_AVAILABLE.to_string(),
            market_cap: NOT_AVAILABLE.to_string(),
            pe_ratio: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Quote subset carried in alert emails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    /// Symbol.
    pub symbol: Symbol,
    /// Current price.
    pub price: f64,
    /// Percent change.
    pub change_percent: f64,
    /// Day high.
    pub high: f64,
    /// Day low.
    pub low: f64,
    /// Day open.
    pub open: f64,
    /// Previous close.
    pub previous_close: f64,
}

impl From<Quote> for StockSnapshot {
    fn from(quote: Quote) -> Self {
        Self {
            symbol: quote.symbol,
            price: quote.current,
            change_percent: quote.change_percent,
            high: quote.high,
            low: quote.low,
            open: quote.open,
            previous_close: quote.previous_close,
        }
    }
}

/// Format a market capitalisation given in millions.
///
/// Both tiers scale the value by 1000; the thresholds are fixed display tiers.
#[must_use]
pub fn format_market_cap(millions: f64) -> String {
    if !millions.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if millions >= TRILLION_TIER_MILLIONS {
        format!("${:.2}T", millions / 1000.0)
    } else if millions >= 1.0 {
        format!("${:.2}B", millions / 1000.0)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Format a price as `$X.XX`; zero means no data.
#[must_use]
pub fn format_price(price: f64) -> String {
    if price == 0.0 || !price.is_finite() {
        NOT_AVAILABLE.to_string()
    } else {
        format!("${price:.2}")
    }
}

/// Format a percent change with an explicit sign for non-negative values.
#[must_use]
pub fn format_change(change_percent: f64) -> String {
    if !change_percent.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let sign = if change_percent >= 0.0 { "+" } else { "" };
    format!("{sign}{change_percent:.2}%")
}

/// Format a resolved P/E ratio with one decimal.
#[must_use]
pub fn format_pe_ratio(pe_ratio: Option<f64>) -> String {
    pe_ratio.map_or_else(|| NOT_AVAILABLE.to_string(), |pe| format!("{pe:.1}"))
}

/// Format a dollar amount with thousands separators, e.g. `$1,234.50`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(2500.0, "$2.50T" ; "trillion tier")]
    #[test_case(1000.0, "$1.00T" ; "trillion threshold")]
    #[test_case(500.0, "$0.50B" ; "billion tier")]
    #[test_case(1.0, "$0.00B" ; "billion threshold")]
    #[test_case(0.5, "N/A" ; "below threshold")]
    #[test_case(0.0, "N/A" ; "zero")]
    fn market_cap_tiers(millions: f64, expected: &str) {
        assert_eq!(format_market_cap(millions), expected);
    }

    #[test_case(189.4, "$189.40")]
    #[test_case(0.0, "N/A")]
    fn price_formatting(price: f64, expected: &str) {
        assert_eq!(format_price(price), expected);
    }

    #[test_case(1.234, "+1.23%")]
    #[test_case(0.0, "+0.00%")]
    #[test_case(-2.5, "-2.50%")]
    fn change_formatting(change: f64, expected: &str) {
        assert_eq!(format_change(change), expected);
    }

    #[test_case(0.0, "$0.00")]
    #[test_case(12.5, "$12.50")]
    #[test_case(1234.5, "$1,234.50")]
    #[test_case(1_234_567.891, "$1,234,567.89")]
    fn currency_formatting(amount: f64, expected: &str) {
        assert_eq!(format_currency(amount), expected);
    }

    #[test]
    fn pe_prefers_ttm() {
        let financials = Financials {
            symbol: Symbol::new("AAPL"),
            metric: HashMap::from([
                (PE_TTM_METRIC.to_string(), 28.44),
                (PE_NORMALIZED_METRIC.to_string(), 30.1),
            ]),
        };
        assert_eq!(format_pe_ratio(financials.pe_ratio()), "28.4");
    }

    #[test]
    fn pe_falls_back_to_normalized_when_ttm_is_zero() {
        let financials = Financials {
            symbol: Symbol::new("AAPL"),
            metric: HashMap::from([
                (PE_TTM_METRIC.to_string(), 0.0),
                (PE_NORMALIZED_METRIC.to_string(), 30.16),
            ]),
        };
        assert_eq!(format_pe_ratio(financials.pe_ratio()), "30.2");
    }

    #[test]
    fn pe_missing_is_not_available() {
        let financials = Financials::empty(Symbol::new("AAPL"));
        assert_eq!(format_pe_ratio(financials.pe_ratio()), NOT_AVAILABLE);
    }

    #[test]
    fn record_from_failed_parts_uses_placeholders() {
        let symbol = Symbol::new("ZZZZ");
        let record = StockRecord::from_parts(
            symbol.clone(),
            &Quote::zeroed(symbol.clone()),
            &Profile::fallback(symbol.clone()),
            &Financials::empty(symbol),
        );

        assert_eq!(record.company, "ZZZZ");
        assert_eq!(record.price_formatted, NOT_AVAILABLE);
        assert_eq!(record.market_cap, NOT_AVAILABLE);
        assert_eq!(record.pe_ratio, NOT_AVAILABLE);
        assert_eq!(record.change_formatted, "+0.00%");
    }

    #[test]
    fn record_from_full_parts() {
        let symbol = Symbol::new("AAPL");
        let quote = Quote {
            symbol: symbol.clone(),
            current: 190.5,
            change_percent: -0.756,
            ..Quote::default()
        };
        let profile = Profile {
            symbol: symbol.clone(),
            name: "Apple Inc".to_string(),
            market_capitalization: 2_950_000.0,
            ..Profile::default()
        };
        let financials = Financials {
            symbol: symbol.clone(),
            metric: HashMap::from([(PE_TTM_METRIC.to_string(), 29.87)]),
        };

        let record = StockRecord::from_parts(symbol, &quote, &profile, &financials);
        assert_eq!(record.company, "Apple Inc");
        assert_eq!(record.price_formatted, "$190.50");
        assert_eq!(record.change_formatted, "-0.76%");
        assert_eq!(record.market_cap, "$2950.00T");
        assert_eq!(record.pe_ratio, "29.9");
    }

    #[test]
    fn unavailable_record() {
        let record = StockRecord::unavailable(Symbol::new("msft"));
        assert_eq!(record.symbol.as_str(), "MSFT");
        assert_eq!(record.price_formatted, NOT_AVAILABLE);
        assert_eq!(record.change_formatted, NOT_AVAILABLE);
    }

    #[test]
    fn snapshot_from_quote() {
        let quote = Quote {
            symbol: Symbol::new("TSLA"),
            current: 250.0,
            change_percent: 1.5,
            high: 255.0,
            low: 245.0,
            open: 248.0,
            previous_close: 246.3,
        };
        let snapshot = StockSnapshot::from(quote);
        assert_eq!(snapshot.price, 250.0);
        assert_eq!(snapshot.previous_close, 246.3);
    }
}
