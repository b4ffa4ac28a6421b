//! Payment Method Repository
//!
//! `(store_id, code)` is guarded by a NOCASE unique index, and a partial
//! index allows one reserved alias per store; callers rely on
//! `RepoError::Duplicate` to detect lost races.

use super::{RepoError, RepoResult};
use serde_json::Value;
use shared::models::{PaymentMethod, RESERVED_CODE_ALIASES};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, store_id, name, display_name, code, icon, bg_color, text_color, config, is_active, disabled_by_super_admin, sort_order, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PaymentMethodRow {
    id: i64,
    store_id: i64,
    name: String,
    display_name: String,
    code: String,
    icon: Option<String>,
    bg_color: Option<String>,
    text_color: Option<String>,
    config: Option<String>,
    is_active: bool,
    disabled_by_super_admin: Option<bool>,
    sort_order: i32,
    created_at: i64,
    updated_at: i64,
}

impl From<PaymentMethodRow> for PaymentMethod {
    fn from(row: PaymentMethodRow) -> Self {
        // Legacy rows may hold non-JSON text; keep it as a string value
        let config = row.config.map(|raw| {
            serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw))
        });
        Self {
            id: row.id,
            store_id: row.store_id,
            name: row.name,
            display_name: row.display_name,
            code: row.code,
            icon: row.icon,
            bg_color: row.bg_color,
            text_color: row.text_color,
            config,
            is_active: row.is_active,
            disabled_by_super_admin: row.disabled_by_super_admin.unwrap_or(false),
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn config_text(config: &Option<Value>) -> Option<String> {
    config.as_ref().map(Value::to_string)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PaymentMethod>> {
    let row = sqlx::query_as::<_, PaymentMethodRow>(&format!(
        "SELECT {COLUMNS} FROM payment_method WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Into::into))
}

/// All methods of a store, ordered by `sort_order`, then `created_at`
pub async fn find_by_store(pool: &SqlitePool, store_id: i64) -> RepoResult<Vec<PaymentMethod>> {
    let rows = sqlx::query_as::<_, PaymentMethodRow>(&format!(
        "SELECT {COLUMNS} FROM payment_method WHERE store_id = ? ORDER BY sort_order, created_at, id"
    ))
    .bind(store_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Case-insensitive code lookup, optionally ignoring one record (self on rename)
pub async fn find_by_store_and_code(
    pool: &SqlitePool,
    store_id: i64,
    code: &str,
    exclude_id: Option<i64>,
) -> RepoResult<Option<PaymentMethod>> {
    let row = sqlx::query_as::<_, PaymentMethodRow>(&format!(
        "SELECT {COLUMNS} FROM payment_method WHERE store_id = ?1 AND code = ?2 COLLATE NOCASE AND (?3 IS NULL OR id <> ?3) LIMIT 1"
    ))
    .bind(store_id)
    .bind(code.trim())
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Into::into))
}

/// The store's reserved method, matched on any reserved alias
pub async fn find_reserved(pool: &SqlitePool, store_id: i64) -> RepoResult<Option<PaymentMethod>> {
    let placeholders = vec!["?"; RESERVED_CODE_ALIASES.len()].join(", ");
    let sql = format!(
        "SELECT {COLUMNS} FROM payment_method WHERE store_id = ? AND LOWER(TRIM(code)) IN ({placeholders}) ORDER BY created_at, id LIMIT 1"
    );
    let mut query = sqlx::query_as::<_, PaymentMethodRow>(&sql).bind(store_id);
    for alias in RESERVED_CODE_ALIASES {
        query = query.bind(*alias);
    }
    let row = query.fetch_optional(pool).await?;
    Ok(row.map(Into::into))
}

pub async fn max_sort_order(pool: &SqlitePool, store_id: i64) -> RepoResult<Option<i32>> {
    let max = sqlx::query_scalar::<_, Option<i32>>(
        "SELECT MAX(sort_order) FROM payment_method WHERE store_id = ?",
    )
    .bind(store_id)
    .fetch_one(pool)
    .await?;
    Ok(max)
}

pub async fn min_sort_order(pool: &SqlitePool, store_id: i64) -> RepoResult<Option<i32>> {
    let min = sqlx::query_scalar::<_, Option<i32>>(
        "SELECT MIN(sort_order) FROM payment_method WHERE store_id = ?",
    )
    .bind(store_id)
    .fetch_one(pool)
    .await?;
    Ok(min)
}

/// Insert a fully resolved record (id and timestamps included)
pub async fn insert(pool: &SqlitePool, method: &PaymentMethod) -> RepoResult<PaymentMethod> {
    sqlx::query(
        "INSERT INTO payment_method (id, store_id, name, display_name, code, icon, bg_color, text_color, config, is_active, disabled_by_super_admin, sort_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
    )
    .bind(method.id)
    .bind(method.store_id)
    .bind(&method.name)
    .bind(&method.display_name)
    .bind(&method.code)
    .bind(&method.icon)
    .bind(&method.bg_color)
    .bind(&method.text_color)
    .bind(config_text(&method.config))
    .bind(method.is_active)
    .bind(method.disabled_by_super_admin)
    .bind(method.sort_order)
    .bind(method.created_at)
    .bind(method.updated_at)
    .execute(pool)
    .await?;
    find_by_id(pool, method.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment method".into()))
}

/// Persist every mutable column of an existing record
pub async fn save(pool: &SqlitePool, method: &PaymentMethod) -> RepoResult<PaymentMethod> {
    let rows = sqlx::query(
        "UPDATE payment_method SET name = ?1, display_name = ?2, code = ?3, icon = ?4, bg_color = ?5, text_color = ?6, config = ?7, is_active = ?8, disabled_by_super_admin = ?9, sort_order = ?10, updated_at = ?11 WHERE id = ?12",
    )
    .bind(&method.name)
    .bind(&method.display_name)
    .bind(&method.code)
    .bind(&method.icon)
    .bind(&method.bg_color)
    .bind(&method.text_color)
    .bind(config_text(&method.config))
    .bind(method.is_active)
    .bind(method.disabled_by_super_admin)
    .bind(method.sort_order)
    .bind(method.updated_at)
    .bind(method.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Payment method {} not found",
            method.id
        )));
    }
    find_by_id(pool, method.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Payment method {} not found", method.id)))
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE payment_method SET is_active = ?, updated_at = ? WHERE id = ?")
        .bind(is_active)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM payment_method WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbService, repository::store};
    use serde_json::json;

    fn method(store_id: i64, code: &str, sort_order: i32, created_at: i64) -> PaymentMethod {
        PaymentMethod {
            id: shared::util::snowflake_id(),
            store_id,
            name: code.to_uppercase(),
            display_name: code.to_uppercase(),
            code: code.to_string(),
            icon: None,
            bg_color: None,
            text_color: None,
            config: None,
            is_active: true,
            disabled_by_super_admin: false,
            sort_order,
            created_at,
            updated_at: created_at,
        }
    }

    async fn setup() -> (SqlitePool, i64) {
        let db = DbService::in_memory().await.unwrap();
        let store = store::create(&db.pool, 1, "Test Store").await.unwrap();
        (db.pool, store.id)
    }

    #[tokio::test]
    async fn test_code_unique_per_store_case_insensitive() {
        let (pool, store_id) = setup().await;
        insert(&pool, &method(store_id, "card", 1, 1)).await.unwrap();

        let err = insert(&pool, &method(store_id, "CARD", 2, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let other = store::create(&pool, 2, "Other").await.unwrap();
        insert(&pool, &method(other.id, "card", 1, 1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_by_store_orders_by_sort_then_created() {
        let (pool, store_id) = setup().await;
        insert(&pool, &method(store_id, "b", 2, 10)).await.unwrap();
        insert(&pool, &method(store_id, "c", 1, 30)).await.unwrap();
        insert(&pool, &method(store_id, "a", 1, 20)).await.unwrap();

        let codes: Vec<String> = find_by_store(&pool, store_id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.code)
            .collect();
        assert_eq!(codes, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_find_by_code_excluding_self() {
        let (pool, store_id) = setup().await;
        let card = insert(&pool, &method(store_id, "card", 1, 1)).await.unwrap();

        assert!(
            find_by_store_and_code(&pool, store_id, " Card ", None)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            find_by_store_and_code(&pool, store_id, "card", Some(card.id))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_find_reserved_matches_aliases() {
        let (pool, store_id) = setup().await;
        assert!(find_reserved(&pool, store_id).await.unwrap().is_none());

        insert(&pool, &method(store_id, "Bargeld", 0, 1)).await.unwrap();
        let reserved = find_reserved(&pool, store_id).await.unwrap().unwrap();
        assert_eq!(reserved.code, "Bargeld");
    }

    #[tokio::test]
    async fn test_one_reserved_alias_per_store() {
        let (pool, store_id) = setup().await;
        insert(&pool, &method(store_id, "cash", 0, 1)).await.unwrap();

        let err = insert(&pool, &method(store_id, "bargeld", 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // Renaming another method onto an alias hits the same index
        let mut card = insert(&pool, &method(store_id, "card", 2, 3)).await.unwrap();
        card.code = "BARGELD".into();
        let err = save(&pool, &card).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // Other stores are unaffected
        let other = store::create(&pool, 2, "Other").await.unwrap();
        insert(&pool, &method(other.id, "bargeld", 0, 1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_config_and_null_flag_roundtrip() {
        let (pool, store_id) = setup().await;
        let mut card = method(store_id, "card", 1, 1);
        card.config = Some(json!({"provider": "stripe"}));
        let card = insert(&pool, &card).await.unwrap();
        assert_eq!(card.config, Some(json!({"provider": "stripe"})));

        sqlx::query("UPDATE payment_method SET disabled_by_super_admin = NULL, config = 'legacy' WHERE id = ?")
            .bind(card.id)
            .execute(&pool)
            .await
            .unwrap();
        let card = find_by_id(&pool, card.id).await.unwrap().unwrap();
        assert!(!card.disabled_by_super_admin);
        assert_eq!(card.config, Some(json!("legacy")));
    }

    #[tokio::test]
    async fn test_sort_order_bounds_and_delete() {
        let (pool, store_id) = setup().await;
        assert_eq!(max_sort_order(&pool, store_id).await.unwrap(), None);

        let a = insert(&pool, &method(store_id, "a", 3, 1)).await.unwrap();
        insert(&pool, &method(store_id, "b", 7, 2)).await.unwrap();
        assert_eq!(max_sort_order(&pool, store_id).await.unwrap(), Some(7));
        assert_eq!(min_sort_order(&pool, store_id).await.unwrap(), Some(3));

        assert!(delete(&pool, a.id).await.unwrap());
        assert!(!delete(&pool, a.id).await.unwrap());
        assert!(!set_active(&pool, a.id, false, 5).await.unwrap());
    }
}
