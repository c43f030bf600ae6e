//! Symbol value object for stock tickers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// A stock ticker symbol, always trimmed and uppercase.
///
/// Examples: "AAPL", "BRK.B", "TSLA"
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol without validation.
    ///
    /// The value is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_uppercase())
    }

    /// Parse user input into a Symbol.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is empty after trimming.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let symbol = Self::new(value);
        if symbol.0.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: "Symbol cannot be empty".to_string(),
            });
        }
        Ok(symbol)
    }

    /// Normalize a list of raw symbols, dropping blanks and keeping order.
    #[must_use]
    pub fn normalize_all<S: AsRef<str>>(raw: &[S]) -> Vec<Self> {
        raw.iter().filter_map(|s| Self::parse(s.as_ref()).ok()).collect()
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_case_and_whitespace() {
        assert_eq!(Symbol::new("  aapl ").as_str(), "AAPL");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(Symbol::parse("   ").is_err());
        assert!(Symbol::parse("").is_err());
    }

    #[test]
    fn normalize_all_drops_blanks_and_keeps_order() {
        let symbols = Symbol::normalize_all(&["msft", " ", "aapl", ""]);
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["MSFT", "AAPL"]);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Symbol::new("nvda")).unwrap();
        assert_eq!(json, r#""NVDA""#);
    }
}
