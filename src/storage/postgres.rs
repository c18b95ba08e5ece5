use crate::config::config::DatabaseConfig;
use crate::error::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.connection_timeout())
        .idle_timeout(Some(config.idle_timeout()))
}

/// 创建连接池并建立初始连接
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = pool_options(config).connect(&config.url).await?;
    tracing::info!(
        max_connections = config.max_connections,
        "PostgreSQL connection pool established"
    );
    Ok(pool)
}

/// 创建连接池，首次使用时才建立连接
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool> {
    Ok(pool_options(config).connect_lazy(&config.url)?)
}

/// 执行 `SELECT 1` 检查数据库是否可达
pub async fn ping(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
