//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! All ports here are driven (secondary/outbound): market data, storage,
//! identity and email.

mod mailer_port;
mod market_data_port;
mod repository_port;
mod session_port;

pub use mailer_port::{MailError, MailerPort, OutgoingEmail};
pub use market_data_port::{MarketDataError, MarketDataPort, SymbolMatch};
pub use repository_port::{
    AlertRepository, RepositoryError, UserDirectoryPort, WatchlistRepository,
};
pub use session_port::SessionPort;
