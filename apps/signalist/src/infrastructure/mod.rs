//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `finnhub/`: Market data over the Finnhub REST API
//!   - `persistence/`: Watchlist, alert and user storage
//!   - `session/`: Session token lookup
//!   - `mailer/`: Email transport
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!   - `scheduler`: Periodic alert and news jobs
//!
//! - **Cross-cutting**
//!   - `retry`: Retry policy and backoff
//!   - `container`: Dependency wiring

pub mod container;
pub mod finnhub;
pub mod http;
pub mod mailer;
pub mod persistence;
pub mod retry;
pub mod scheduler;
pub mod session;
