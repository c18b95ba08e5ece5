//! 存储工厂模块
//!
//! 根据配置创建相应的存储实例。

use crate::config::config::{DatabaseBackend, DatabaseConfig};
use crate::error::Result;
use crate::models::record_repository::{
    MemoryRecordRepository, PgRecordRepository, RecordRepository,
};
use crate::storage::{migration, postgres};
use std::sync::Arc;

/// 存储实例枚举
#[derive(Clone)]
pub enum StorageInstance {
    Postgres(PgRecordRepository),
    Memory(MemoryRecordRepository),
}

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建存储实例
    pub async fn create(config: &DatabaseConfig) -> Result<StorageInstance> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = postgres::connect(config).await?;
                Ok(StorageInstance::Postgres(PgRecordRepository::new(pool)))
            }
            DatabaseBackend::Memory => {
                tracing::warn!("Using in-memory storage; records are lost on restart");
                Ok(StorageInstance::Memory(MemoryRecordRepository::new()))
            }
        }
    }
}

impl StorageInstance {
    /// 后端名称
    pub fn backend(&self) -> DatabaseBackend {
        match self {
            StorageInstance::Postgres(_) => DatabaseBackend::Postgres,
            StorageInstance::Memory(_) => DatabaseBackend::Memory,
        }
    }

    /// 创建表结构；内存后端无需迁移
    pub async fn migrate(&self) -> Result<()> {
        match self {
            StorageInstance::Postgres(repo) => migration::run(repo.pool()).await,
            StorageInstance::Memory(_) => Ok(()),
        }
    }

    /// 获取仓储
    pub fn repository(&self) -> Arc<dyn RecordRepository> {
        match self {
            StorageInstance::Postgres(repo) => Arc::new(repo.clone()),
            StorageInstance::Memory(repo) => Arc::new(repo.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::AppConfig;
    use crate::models::record::Record;

    #[tokio::test]
    async fn memory_backend_needs_no_database() {
        let config = AppConfig::in_memory();
        let storage = StorageFactory::create(&config.database).await.unwrap();

        assert_eq!(storage.backend(), DatabaseBackend::Memory);
        storage.migrate().await.unwrap();

        let repo = storage.repository();
        repo.create(&Record::fake()).await.unwrap();
        assert_eq!(storage.repository().list().await.unwrap().len(), 1);
    }
}
