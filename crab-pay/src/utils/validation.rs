//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Method names and display names
pub const MAX_NAME_LEN: usize = 200;

/// Method codes (machine keys)
pub const MAX_CODE_LEN: usize = 64;

/// Icons and color codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Override reasons
pub const MAX_NOTE_LEN: usize = 500;

// ── Numeric bounds ──────────────────────────────────────────────────

/// Accepted `sort_order` range. Leaves headroom below and above so that
/// appending after the last method or placing the reserved one before the
/// first never leaves `i32`.
pub const MIN_SORT_ORDER: i32 = -1_000_000;
pub const MAX_SORT_ORDER: i32 = 1_000_000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty after trimming and within
/// the length limit. Returns the trimmed value.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::required(field));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            trimmed.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(trimmed.to_string())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// 排序值必须在 [`MIN_SORT_ORDER`, `MAX_SORT_ORDER`] 范围内
pub fn validate_sort_order(value: Option<i32>) -> Result<(), AppError> {
    if let Some(order) = value
        && !(MIN_SORT_ORDER..=MAX_SORT_ORDER).contains(&order)
    {
        return Err(AppError::validation(format!(
            "sort_order {order} is out of range ({MIN_SORT_ORDER}..={MAX_SORT_ORDER})"
        ))
        .with_detail("field", "sort_order"));
    }
    Ok(())
}
