//! Unified error codes for the payment configuration engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Store errors
//! - 5xxx: Payment method errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,

    // ==================== 3xxx: Store ====================
    /// Store not found
    StoreNotFound = 3001,

    // ==================== 5xxx: Payment method ====================
    /// Payment method not found
    PaymentMethodNotFound = 5101,
    /// Another payment method of the store already uses this code
    PaymentMethodCodeConflict = 5102,
    /// The reserved (cash) method cannot be disabled
    ReservedMethodProtected = 5103,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

/// Caller-facing failure taxonomy
///
/// Several codes collapse into one kind (e.g. `StoreNotFound` and
/// `PaymentMethodNotFound` are both `NotFound`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ValidationFailed,
    NotFound,
    Conflict,
    Forbidden,
    Internal,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Map this code onto the caller-facing failure kind
    pub const fn kind(&self) -> FailureKind {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::RequiredField => FailureKind::ValidationFailed,
            ErrorCode::NotFound | ErrorCode::StoreNotFound | ErrorCode::PaymentMethodNotFound => {
                FailureKind::NotFound
            }
            ErrorCode::PaymentMethodCodeConflict => FailureKind::Conflict,
            ErrorCode::ReservedMethodProtected => FailureKind::Forbidden,
            ErrorCode::DatabaseError => FailureKind::Internal,
        }
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",

            // Store
            ErrorCode::StoreNotFound => "Store not found",

            // Payment method
            ErrorCode::PaymentMethodNotFound => "Payment method not found",
            ErrorCode::PaymentMethodCodeConflict => {
                "A payment method with this code already exists for the store"
            }
            ErrorCode::ReservedMethodProtected => "Reserved payment method cannot be disabled",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),
            3001 => Ok(ErrorCode::StoreNotFound),
            5101 => Ok(ErrorCode::PaymentMethodNotFound),
            5102 => Ok(ErrorCode::PaymentMethodCodeConflict),
            5103 => Ok(ErrorCode::ReservedMethodProtected),
            9002 => Ok(ErrorCode::DatabaseError),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}
