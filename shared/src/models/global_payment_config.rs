//! Global Payment Config Model
//!
//! Platform-wide kill switch keyed by method code. Referenced by code only,
//! so a row may exist without any matching store method.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Global override row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalPaymentConfig {
    pub code: String,
    pub disabled_globally: bool,
    pub reason: Option<String>,
    pub updated_at: i64,
}

/// Upsert global override payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalPaymentConfigUpsert {
    pub code: String,
    pub disabled_globally: bool,
    pub reason: Option<String>,
}

impl GlobalPaymentConfigUpsert {
    pub fn new(code: impl Into<String>, disabled_globally: bool, reason: Option<String>) -> Self {
        Self {
            code: code.into(),
            disabled_globally,
            reason,
        }
    }

    /// Decode a raw JSON body, requiring `disabled_globally` to be a real
    /// boolean (`"true"` or `1` are rejected).
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::validation("Request body must be a JSON object"))?;

        let code = match obj.get("code") {
            Some(Value::String(code)) => code.clone(),
            Some(Value::Null) | None => return Err(AppError::required("code")),
            Some(_) => return Err(AppError::validation("code must be a string")),
        };

        let disabled_globally = match obj.get("disabled_globally") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Null) | None => return Err(AppError::required("disabled_globally")),
            Some(_) => {
                return Err(AppError::validation("disabled_globally must be a boolean")
                    .with_detail("field", "disabled_globally"));
            }
        };

        let reason = match obj.get("reason") {
            Some(Value::String(reason)) => Some(reason.clone()),
            Some(Value::Null) | None => None,
            Some(_) => return Err(AppError::validation("reason must be a string")),
        };

        Ok(Self {
            code,
            disabled_globally,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::json;

    #[test]
    fn test_from_json_accepts_boolean() {
        let upsert = GlobalPaymentConfigUpsert::from_json(
            &json!({"code": "card", "disabled_globally": true, "reason": "fraud"}),
        )
        .unwrap();
        assert_eq!(
            upsert,
            GlobalPaymentConfigUpsert::new("card", true, Some("fraud".into()))
        );
    }

    #[test]
    fn test_from_json_rejects_non_boolean_flag() {
        for flag in [json!("true"), json!(1), json!(null)] {
            let err = GlobalPaymentConfigUpsert::from_json(
                &json!({"code": "card", "disabled_globally": flag}),
            )
            .unwrap_err();
            assert_eq!(err.kind(), FailureKind::ValidationFailed);
        }
    }

    #[test]
    fn test_from_json_requires_code() {
        let err =
            GlobalPaymentConfigUpsert::from_json(&json!({"disabled_globally": false})).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationFailed);
        assert!(GlobalPaymentConfigUpsert::from_json(&json!([1])).is_err());
    }
}
