//! Crab Pay - 支付方式配置与可见性决策引擎
//!
//! # 架构概述
//!
//! 两层独立配置合成最终可见性:
//!
//! - **门店层** (`services::payment_methods`): 每店支付方式 CRUD, 保留方式 (cash) 自愈
//! - **平台层** (`services::global_config`): 按 code 的全局禁用开关, 读取失败时放行
//! - **决策** (`services::visibility`): 顾客视图过滤 / 管理视图标注
//!
//! # 模块结构
//!
//! ```text
//! crab-pay/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── services/      # 业务服务
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、校验
//! └── db/            # SQLite 连接池、迁移、仓储
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use services::{GlobalPaymentConfigService, PaymentMethodService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorCategory, ErrorCode, ErrorResponse};

pub use utils::logger::init_logger_with_file;

/// 加载 .env 并初始化日志, 返回加载后的配置
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
