//! 服务层 - 支付方式配置与可见性
//!
//! # 服务列表
//!
//! - [`PaymentMethodService`] - 门店支付方式 CRUD 与保留方式自愈
//! - [`GlobalPaymentConfigService`] - 平台级按 code 的全局禁用开关
//! - [`visibility`] - 顾客视图 / 管理视图的过滤与排序 (纯函数)
//! - [`provisioning`] - 默认支付方式种子表与预配
//! - [`StoreDirectory`] - 门店存在性查询 (外部协作者)

pub mod global_config;
pub mod payment_methods;
pub mod provisioning;
pub mod store_directory;
pub mod visibility;

pub use global_config::GlobalPaymentConfigService;
pub use payment_methods::PaymentMethodService;
pub use provisioning::{DEFAULT_METHOD_SEEDS, MethodSeed, RESERVED_METHOD_SEED};
pub use store_directory::{SqliteStoreDirectory, StoreDirectory};
