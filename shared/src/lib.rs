//! Shared types for the payment configuration engine
//!
//! Models exchanged over the API, the unified error system and small
//! utilities used by the engine crate.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode, ErrorResponse, FailureKind};
