//! 服务器状态 - 所有服务的共享句柄

use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::{
    DEFAULT_METHOD_SEEDS, GlobalPaymentConfigService, PaymentMethodService, SqliteStoreDirectory,
    StoreDirectory,
};

/// Cheap to clone; handed to every axum handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub payment_methods: PaymentMethodService,
    pub global_config: GlobalPaymentConfigService,
    pub stores: Arc<dyn StoreDirectory>,
}

impl ServerState {
    /// 打开数据库并组装服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let db = DbService::new(&config.database_path).await?;
        let state = Self::from_db(config.clone(), db);

        if config.provision_defaults {
            state
                .payment_methods
                .provision_all_stores(DEFAULT_METHOD_SEEDS)
                .await?;
        }
        Ok(state)
    }

    /// Wire services over an already-open database
    pub fn from_db(config: Config, db: DbService) -> Self {
        let stores: Arc<dyn StoreDirectory> = Arc::new(SqliteStoreDirectory::new(db.pool.clone()));
        let global_config = GlobalPaymentConfigService::new(db.pool.clone());
        let payment_methods =
            PaymentMethodService::new(db.pool.clone(), stores.clone(), global_config.clone());
        Self {
            config,
            db,
            payment_methods,
            global_config,
            stores,
        }
    }
}
