//! Session Adapters
//!
//! Token to user lookups backing the `SessionPort`.

mod in_memory;

pub use in_memory::InMemorySessionStore;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "signalist_session";
