//! Hand-written port doubles shared by the use case tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::ports::{
    MailError, MailerPort, MarketDataError, MarketDataPort, OutgoingEmail, SymbolMatch,
};
use crate::domain::{Financials, Profile, Quote, RawArticle, Symbol};

fn not_found(what: &str, symbol: &Symbol) -> MarketDataError {
    MarketDataError::ApiError {
        status: 404,
        message: format!("no {what} for {symbol}"),
    }
}

/// Market data double; anything not configured fails with a 404.
#[derive(Default)]
pub struct MockMarketData {
    quotes: HashMap<Symbol, Quote>,
    profiles: HashMap<Symbol, Profile>,
    financials: HashMap<Symbol, Financials>,
    company_news: HashMap<Symbol, Vec<RawArticle>>,
    general_news: Option<Vec<RawArticle>>,
    search_results: Option<Vec<SymbolMatch>>,
    calls: Mutex<Vec<String>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, current: f64, change_percent: f64) -> Self {
        let symbol = Symbol::new(symbol);
        let quote = Quote {
            symbol: symbol.clone(),
            current,
            change_percent,
            high: current + 1.0,
            low: current - 1.0,
            open: current,
            previous_close: current - 0.5,
        };
        self.quotes.insert(symbol, quote);
        self
    }

    pub fn with_profile(mut self, symbol: &str, name: &str, market_cap_millions: f64) -> Self {
        let symbol = Symbol::new(symbol);
        let profile = Profile {
            symbol: symbol.clone(),
            name: name.to_string(),
            ticker: symbol.as_str().to_string(),
            exchange: "NASDAQ".to_string(),
            market_capitalization: market_cap_millions,
        };
        self.profiles.insert(symbol, profile);
        self
    }

    pub fn with_metric(mut self, symbol: &str, name: &str, value: f64) -> Self {
        let symbol = Symbol::new(symbol);
        self.financials
            .entry(symbol.clone())
            .or_insert_with(|| Financials::empty(symbol))
            .metric
            .insert(name.to_string(), value);
        self
    }

    pub fn with_company_news(mut self, symbol: &str, articles: Vec<RawArticle>) -> Self {
        self.company_news.insert(Symbol::new(symbol), articles);
        self
    }

    pub fn with_general_news(mut self, articles: Vec<RawArticle>) -> Self {
        self.general_news = Some(articles);
        self
    }

    pub fn with_search_results(mut self, results: Vec<SymbolMatch>) -> Self {
        self.search_results = Some(results);
        self
    }

    /// Calls made so far, formatted as `op:arg`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        self.record(format!("quote:{symbol}"));
        self.quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| not_found("quote", symbol))
    }

    async fn profile(&self, symbol: &Symbol) -> Result<Profile, MarketDataError> {
        self.record(format!("profile:{symbol}"));
        self.profiles
            .get(symbol)
            .cloned()
            .ok_or_else(|| not_found("profile", symbol))
    }

    async fn financials(&self, symbol: &Symbol) -> Result<Financials, MarketDataError> {
        self.record(format!("financials:{symbol}"));
        self.financials
            .get(symbol)
            .cloned()
            .ok_or_else(|| not_found("metrics", symbol))
    }

    async fn company_news(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawArticle>, MarketDataError> {
        self.record(format!("company_news:{symbol}:{from}:{to}"));
        self.company_news
            .get(symbol)
            .cloned()
            .ok_or_else(|| not_found("news", symbol))
    }

    async fn general_news(&self) -> Result<Vec<RawArticle>, MarketDataError> {
        self.record("general_news".to_string());
        self.general_news
            .clone()
            .ok_or_else(|| MarketDataError::ConnectionError {
                message: "general news unavailable".to_string(),
            })
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        self.record(format!("search:{query}"));
        self.search_results
            .clone()
            .ok_or(MarketDataError::RateLimited)
    }
}

/// Article with all required fields set.
pub fn article(id: i64, headline: &str, datetime: i64) -> RawArticle {
    RawArticle {
        id,
        category: "general".to_string(),
        datetime,
        headline: headline.to_string(),
        image: String::new(),
        related: String::new(),
        source: "Reuters".to_string(),
        summary: format!("Summary of {headline}"),
        url: format!("https://news.example.com/{id}"),
    }
}

/// Mailer double that records sent mail and rejects listed recipients.
#[derive(Default)]
pub struct RecordingMailer {
    rejected: Vec<String>,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(recipients: &[&str]) -> Self {
        Self {
            rejected: recipients.iter().map(ToString::to_string).collect(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailerPort for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if self.rejected.contains(&email.to) {
            return Err(MailError::Rejected { recipient: email.to });
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}
