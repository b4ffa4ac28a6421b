//! Unified error system for the payment configuration engine
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`FailureKind`]: The caller-facing taxonomy (validation / not found /
//!   conflict / forbidden / internal)
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorResponse`]: JSON body rendered for failed requests
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 3xxx: Store errors
//! - 5xxx: Payment method errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, FailureKind};
//!
//! let err = AppError::code_conflict(1, "card");
//! assert_eq!(err.code, ErrorCode::PaymentMethodCodeConflict);
//! assert_eq!(err.kind(), FailureKind::Conflict);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, FailureKind, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorResponse};
