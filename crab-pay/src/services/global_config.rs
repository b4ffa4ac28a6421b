//! Global Payment Config Service
//!
//! Platform-wide kill switches keyed by method code. Reads used on the
//! checkout path are fail-safe: a lookup failure means "not disabled".

use std::collections::HashSet;

use shared::models::{GlobalPaymentConfig, GlobalPaymentConfigUpsert, is_reserved_code};
use sqlx::SqlitePool;

use crate::db::repository::global_payment_config;
use crate::utils::validation::{MAX_CODE_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct GlobalPaymentConfigService {
    pool: SqlitePool,
}

impl GlobalPaymentConfigService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All override rows ordered by code
    pub async fn find_all(&self) -> AppResult<Vec<GlobalPaymentConfig>> {
        Ok(global_payment_config::find_all(&self.pool).await?)
    }

    /// Absence is `Ok(None)`, callers treat it as "no override"
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<GlobalPaymentConfig>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        Ok(global_payment_config::find_by_code(&self.pool, code).await?)
    }

    /// Insert or overwrite the override for `data.code`
    pub async fn upsert(&self, data: GlobalPaymentConfigUpsert) -> AppResult<GlobalPaymentConfig> {
        let code = validate_required_text(&data.code, "code", MAX_CODE_LEN)?;
        validate_optional_text(data.reason.as_deref(), "reason", MAX_NOTE_LEN)?;

        if data.disabled_globally && is_reserved_code(&code) {
            return Err(AppError::reserved_protected(
                "Reserved payment method cannot be disabled globally",
            )
            .with_detail("code", code));
        }

        let reason = data
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        let row = global_payment_config::upsert(
            &self.pool,
            &code,
            data.disabled_globally,
            reason,
            shared::util::now_millis(),
        )
        .await?;

        tracing::info!(
            code = %row.code,
            disabled_globally = row.disabled_globally,
            "Global payment config upserted"
        );
        Ok(row)
    }

    /// `true` only when an override for `code` exists and is disabled.
    /// Never fails.
    pub async fn is_globally_disabled(&self, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }
        match global_payment_config::is_disabled(&self.pool, code).await {
            Ok(disabled) => disabled,
            Err(e) => {
                tracing::warn!(code = %code, error = %e, "Global override lookup failed, treating as enabled");
                false
            }
        }
    }

    /// Lower-cased codes of every disabled override. Never fails.
    pub async fn disabled_codes(&self) -> HashSet<String> {
        match global_payment_config::find_disabled_codes(&self.pool).await {
            Ok(codes) => codes
                .into_iter()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Global disabled-codes lookup failed, treating none as disabled");
                HashSet::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::error::{ErrorCode, FailureKind};

    async fn service() -> GlobalPaymentConfigService {
        let db = DbService::in_memory().await.unwrap();
        GlobalPaymentConfigService::new(db.pool)
    }

    #[tokio::test]
    async fn test_upsert_trims_code_and_reason() {
        let svc = service().await;
        let row = svc
            .upsert(GlobalPaymentConfigUpsert::new("  klarna ", true, Some("  ".into())))
            .await
            .unwrap();
        assert_eq!(row.code, "klarna");
        assert_eq!(row.reason, None);
        assert!(svc.find_by_code(" klarna").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reserved_code_cannot_be_disabled() {
        let svc = service().await;
        for code in ["cash", " CASH ", "Bargeld"] {
            let err = svc
                .upsert(GlobalPaymentConfigUpsert::new(code, true, None))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ReservedMethodProtected);
            assert_eq!(err.kind(), FailureKind::Forbidden);
        }
        assert!(svc.find_all().await.unwrap().is_empty());

        // Explicitly enabling it is harmless
        let row = svc
            .upsert(GlobalPaymentConfigUpsert::new("cash", false, None))
            .await
            .unwrap();
        assert!(!row.disabled_globally);
    }

    #[tokio::test]
    async fn test_empty_code_is_validation_error() {
        let svc = service().await;
        let err = svc
            .upsert(GlobalPaymentConfigUpsert::new("   ", true, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationFailed);

        let err = svc
            .upsert(GlobalPaymentConfigUpsert::new("card", true, Some("r".repeat(501))))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationFailed);
    }

    #[tokio::test]
    async fn test_lookups() {
        let svc = service().await;
        svc.upsert(GlobalPaymentConfigUpsert::new("PayPal", true, None))
            .await
            .unwrap();
        svc.upsert(GlobalPaymentConfigUpsert::new("card", false, None))
            .await
            .unwrap();

        assert!(svc.is_globally_disabled(" paypal ").await);
        assert!(!svc.is_globally_disabled("card").await);
        assert!(!svc.is_globally_disabled("").await);
        assert!(svc.find_by_code("").await.unwrap().is_none());
        assert!(svc.find_by_code("sepa").await.unwrap().is_none());

        let codes = svc.disabled_codes().await;
        assert_eq!(codes, HashSet::from(["paypal".to_string()]));
    }

    #[tokio::test]
    async fn test_fail_safe_on_storage_error() {
        let db = DbService::in_memory().await.unwrap();
        let svc = GlobalPaymentConfigService::new(db.pool.clone());
        svc.upsert(GlobalPaymentConfigUpsert::new("card", true, None))
            .await
            .unwrap();

        sqlx::query("DROP TABLE global_payment_method_config")
            .execute(&db.pool)
            .await
            .unwrap();

        assert!(!svc.is_globally_disabled("card").await);
        assert!(svc.disabled_codes().await.is_empty());
        assert!(svc.find_all().await.is_err());
    }
}
