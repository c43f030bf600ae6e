//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for interacting with external systems
//! - **Use Cases**: Aggregation, news selection, actions and email workflows
//! - **DTOs**: Outcome types returned across the API boundary
//! - **Templates**: HTML rendering for outgoing email

pub mod dto;
pub mod ports;
pub mod templates;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use use_cases::*;
