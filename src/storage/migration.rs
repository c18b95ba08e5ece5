//! 表结构迁移
//!
//! 只负责在表不存在时创建 `person` 表，可重复执行。

use crate::error::Result;
use sqlx::PgPool;

pub const CREATE_PERSON_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS person (
    id           UUID PRIMARY KEY,
    name         TEXT        NOT NULL,
    age          INTEGER     NOT NULL,
    address      TEXT        NOT NULL,
    phone_number TEXT        NOT NULL,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at   TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// 执行迁移
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running schema migration");
    sqlx::query(CREATE_PERSON_TABLE).execute(pool).await?;
    tracing::info!("Schema migration complete");
    Ok(())
}
