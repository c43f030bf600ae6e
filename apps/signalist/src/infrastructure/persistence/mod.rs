//! Persistence Adapters
//!
//! Storage implementations of the repository ports.

pub mod in_memory;

pub use in_memory::{InMemoryAlertRepository, InMemoryUserDirectory, InMemoryWatchlistRepository};
