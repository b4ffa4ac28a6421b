//! Store Directory
//!
//! The engine does not own stores; it only asks whether one exists and who
//! owns it.

use async_trait::async_trait;
use shared::models::StoreRef;
use sqlx::SqlitePool;

use crate::db::repository::store;
use crate::utils::{AppError, AppResult};

/// Store-existence lookup
#[async_trait]
pub trait StoreDirectory: Send + Sync {
    async fn find_store(&self, store_id: i64) -> AppResult<Option<StoreRef>>;

    /// Every known store id (used by bulk provisioning)
    async fn list_store_ids(&self) -> AppResult<Vec<i64>>;

    /// Like [`find_store`](Self::find_store) but absence is `StoreNotFound`
    async fn require_store(&self, store_id: i64) -> AppResult<StoreRef> {
        self.find_store(store_id)
            .await?
            .ok_or_else(|| AppError::store_not_found(store_id))
    }
}

/// Directory backed by the local `store` table
#[derive(Clone)]
pub struct SqliteStoreDirectory {
    pool: SqlitePool,
}

impl SqliteStoreDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreDirectory for SqliteStoreDirectory {
    async fn find_store(&self, store_id: i64) -> AppResult<Option<StoreRef>> {
        Ok(store::find_by_id(&self.pool, store_id).await?)
    }

    async fn list_store_ids(&self) -> AppResult<Vec<i64>> {
        Ok(store::find_all_ids(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::error::ErrorCode;

    #[tokio::test]
    async fn test_require_store() {
        let db = DbService::in_memory().await.unwrap();
        let created = store::create(&db.pool, 7, "Bistro").await.unwrap();
        let directory = SqliteStoreDirectory::new(db.pool.clone());

        assert_eq!(directory.require_store(created.id).await.unwrap(), created);

        let err = directory.require_store(created.id + 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreNotFound);
    }
}
