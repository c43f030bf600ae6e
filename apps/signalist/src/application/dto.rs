//! Data transfer objects for API boundaries.

use serde::{Deserialize, Serialize};

use crate::domain::Symbol;

/// Outcome of a watchlist or alert action.
///
/// Actions never surface storage errors directly; they always answer with a
/// structured outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the action took effect.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

impl ActionResult {
    /// Successful outcome.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Failed outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A symbol search hit annotated with the caller's watchlist status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbol.
    pub symbol: Symbol,
    /// Company name.
    pub name: String,
    /// Exchange label.
    pub exchange: String,
    /// Security type.
    #[serde(rename = "type")]
    pub security_type: String,
    /// Whether the symbol is on the caller's watchlist.
    pub is_in_watchlist: bool,
}
