//! Data models
//!
//! Shared between the engine and its API clients.
//! All IDs are `i64` (snowflake), timestamps are epoch milliseconds.

pub mod global_payment_config;
pub mod payment_method;
pub mod store;

// Re-exports
pub use global_payment_config::*;
pub use payment_method::*;
pub use store::*;
