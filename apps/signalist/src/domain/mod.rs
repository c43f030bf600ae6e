//! Domain Layer
//!
//! Value objects, entities and pure formatting rules. Nothing in here performs
//! I/O; the application layer feeds it data fetched through ports.
//!
//! - `symbol`: ticker normalisation
//! - `market`: quotes, profiles, financials and the display-ready stock record
//! - `news`: raw and formatted news articles
//! - `account`: users, watchlist entries and alerts

pub mod account;
pub mod errors;
pub mod market;
pub mod news;
pub mod symbol;

pub use account::{Alert, UserAccount, UserId, WatchlistItem};
pub use errors::DomainError;
pub use market::{
    Financials, NOT_AVAILABLE, PE_NORMALIZED_METRIC, PE_TTM_METRIC, Profile, Quote, StockRecord,
    StockSnapshot, format_change, format_currency, format_market_cap, format_pe_ratio,
    format_price,
};
pub use news::{Article, COMPANY_CATEGORY, RawArticle};
pub use symbol::Symbol;
