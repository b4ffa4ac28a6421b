use crab_pay::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 环境 (dotenv, 日志) 与配置
    let config = setup_environment();

    tracing::info!(
        environment = %config.environment,
        database = %config.database_path,
        "🦀 Crab Pay starting..."
    );

    // 2. 初始化服务器状态 (数据库、迁移、默认预配)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
