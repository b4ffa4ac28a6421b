//! Store Repository

use super::{RepoError, RepoResult};
use shared::models::StoreRef;
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: i64,
    owner_id: i64,
    name: String,
}

impl From<StoreRow> for StoreRef {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
        }
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StoreRef>> {
    let row = sqlx::query_as::<_, StoreRow>("SELECT id, owner_id, name FROM store WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn find_all_ids(pool: &SqlitePool) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM store ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Register a store row (onboarding / fixtures)
pub async fn create(pool: &SqlitePool, owner_id: i64, name: &str) -> RepoResult<StoreRef> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO store (id, owner_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(owner_id)
        .bind(name)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create store".into()))
}
