use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | DATABASE_PATH | {WORK_DIR}/payment.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 设置且目录存在时按天滚动写文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | PROVISION_DEFAULTS | true | 启动时为所有门店预配默认支付方式 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pay HTTP_PORT=8080 cargo run -p crab-pay
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    pub database_path: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub provision_defaults: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("payment.db")
                .to_string_lossy()
                .into_owned()
        });
        Self {
            work_dir,
            database_path,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            provision_defaults: std::env::var("PROVISION_DEFAULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// 使用自定义工作目录和端口, 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let work_dir = work_dir.into();
        Self {
            database_path: PathBuf::from(&work_dir)
                .join("payment.db")
                .to_string_lossy()
                .into_owned(),
            work_dir,
            http_port,
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
            provision_defaults: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
