//! Error types and API response structures

use super::codes::{ErrorCode, FailureKind};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type surfaced by every engine operation, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Caller-facing failure kind
    pub fn kind(&self) -> FailureKind {
        self.code.kind()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a required-field error, naming the field in the details
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a store not found error
    pub fn store_not_found(store_id: i64) -> Self {
        Self::with_message(ErrorCode::StoreNotFound, format!("Store {store_id} not found"))
            .with_detail("store_id", store_id)
    }

    /// Create a payment method not found error
    pub fn method_not_found(id: i64) -> Self {
        Self::with_message(
            ErrorCode::PaymentMethodNotFound,
            format!("Payment method {id} not found"),
        )
        .with_detail("id", id)
    }

    /// Create a `(store, code)` uniqueness conflict
    pub fn code_conflict(store_id: i64, code: &str) -> Self {
        Self::with_message(
            ErrorCode::PaymentMethodCodeConflict,
            format!("Payment method code '{code}' already exists for store {store_id}"),
        )
        .with_detail("store_id", store_id)
        .with_detail("code", code)
    }

    /// Create a reserved-method protection error
    pub fn reserved_protected(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ReservedMethodProtected, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// JSON body of a failed request
///
/// `code` is the numeric [`ErrorCode`], so clients can branch on it without
/// parsing the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // System errors are logged in full and rendered without internals
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
            let body = ErrorResponse::from(&AppError::new(self.code));
            return (status, Json(body)).into_response();
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
