//! Global Payment Config Repository

use super::{RepoError, RepoResult};
use shared::models::GlobalPaymentConfig;
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct GlobalPaymentConfigRow {
    code: String,
    disabled_globally: bool,
    reason: Option<String>,
    updated_at: i64,
}

impl From<GlobalPaymentConfigRow> for GlobalPaymentConfig {
    fn from(row: GlobalPaymentConfigRow) -> Self {
        Self {
            code: row.code,
            disabled_globally: row.disabled_globally,
            reason: row.reason,
            updated_at: row.updated_at,
        }
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<GlobalPaymentConfig>> {
    let rows = sqlx::query_as::<_, GlobalPaymentConfigRow>(
        "SELECT code, disabled_globally, reason, updated_at FROM global_payment_method_config ORDER BY code",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<GlobalPaymentConfig>> {
    let row = sqlx::query_as::<_, GlobalPaymentConfigRow>(
        "SELECT code, disabled_globally, reason, updated_at FROM global_payment_method_config WHERE code = ?",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Into::into))
}

/// Whether any row matching `code` (case-insensitive) is disabled
pub async fn is_disabled(pool: &SqlitePool, code: &str) -> RepoResult<bool> {
    let hits = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM global_payment_method_config WHERE code = ? AND disabled_globally = 1",
    )
    .bind(code)
    .fetch_one(pool)
    .await?;
    Ok(hits > 0)
}

pub async fn find_disabled_codes(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let codes = sqlx::query_scalar::<_, String>(
        "SELECT code FROM global_payment_method_config WHERE disabled_globally = 1",
    )
    .fetch_all(pool)
    .await?;
    Ok(codes)
}

/// Insert or overwrite the row keyed by `code` (last write wins, including
/// the stored casing)
pub async fn upsert(
    pool: &SqlitePool,
    code: &str,
    disabled_globally: bool,
    reason: Option<&str>,
    now: i64,
) -> RepoResult<GlobalPaymentConfig> {
    sqlx::query(
        r#"
        INSERT INTO global_payment_method_config (code, disabled_globally, reason, updated_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT (code) DO UPDATE SET
            code = excluded.code,
            disabled_globally = excluded.disabled_globally,
            reason = excluded.reason,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(code)
    .bind(disabled_globally)
    .bind(reason)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_code(pool, code)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Failed to upsert global config '{code}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_upsert_overwrites_single_row() {
        let db = DbService::in_memory().await.unwrap();
        upsert(&db.pool, "card", false, None, 1).await.unwrap();
        let row = upsert(&db.pool, "card", true, Some("fraud"), 2).await.unwrap();

        assert!(row.disabled_globally);
        assert_eq!(row.reason.as_deref(), Some("fraud"));
        assert_eq!(row.updated_at, 2);
        assert_eq!(find_all(&db.pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_is_disabled_case_insensitive() {
        let db = DbService::in_memory().await.unwrap();
        upsert(&db.pool, "PayPal", true, None, 1).await.unwrap();
        upsert(&db.pool, "card", false, None, 1).await.unwrap();

        assert!(is_disabled(&db.pool, "paypal").await.unwrap());
        assert!(!is_disabled(&db.pool, "card").await.unwrap());
        assert!(!is_disabled(&db.pool, "unknown").await.unwrap());
        assert_eq!(
            find_disabled_codes(&db.pool).await.unwrap(),
            vec!["PayPal".to_string()]
        );
    }

    #[tokio::test]
    async fn test_codes_differing_in_case_share_a_row() {
        let db = DbService::in_memory().await.unwrap();
        upsert(&db.pool, "PayPal", true, None, 1).await.unwrap();
        let row = upsert(&db.pool, "paypal", false, None, 2).await.unwrap();

        assert_eq!(row.code, "paypal");
        assert!(!row.disabled_globally);
        assert_eq!(find_all(&db.pool).await.unwrap().len(), 1);
        assert!(find_by_code(&db.pool, "PAYPAL").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_code() {
        let db = DbService::in_memory().await.unwrap();
        for code in ["zelle", "apple_pay", "klarna"] {
            upsert(&db.pool, code, false, None, 1).await.unwrap();
        }
        let codes: Vec<String> = find_all(&db.pool)
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.code)
            .collect();
        assert_eq!(codes, vec!["apple_pay", "klarna", "zelle"]);
    }
}
