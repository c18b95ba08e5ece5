//! Record 仓储
//!
//! 提供人员记录的持久化服务：创建与列出。

use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::PgPool;
use std::sync::Arc;

use crate::error::Result;
use crate::models::record::Record;
use crate::storage::postgres;

/// Record 仓储 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// 创建记录，返回已存储的记录
    async fn create(&self, record: &Record) -> Result<Record>;

    /// 列出全部记录，顺序由存储决定
    async fn list(&self) -> Result<Vec<Record>>;

    /// 检查存储是否可用
    async fn ping(&self) -> Result<()>;
}

/// PostgreSQL 仓储实现
#[derive(Clone)]
pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn create(&self, record: &Record) -> Result<Record> {
        tracing::debug!(id = %record.id, "inserting record");

        sqlx::query(
            "INSERT INTO person (id, name, age, address, phone_number, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(record.age)
        .bind(&record.address)
        .bind(&record.phone_number)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(record.clone())
    }

    async fn list(&self) -> Result<Vec<Record>> {
        let records = sqlx::query_as::<_, Record>(
            "SELECT id, name, age, address, phone_number, created_at, updated_at FROM person",
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = records.len(), "listed records");
        Ok(records)
    }

    async fn ping(&self) -> Result<()> {
        postgres::ping(&self.pool).await
    }
}

/// 内存仓储实现，按插入顺序列出
#[derive(Clone, Default)]
pub struct MemoryRecordRepository {
    records: Arc<RwLock<Vec<Record>>>,
}

impl MemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RecordRepository for MemoryRecordRepository {
    async fn create(&self, record: &Record) -> Result<Record> {
        let mut records = self.records.write();
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(crate::error::AppError::Persistence(format!(
                "duplicate key value violates unique constraint: id {}",
                record.id
            )));
        }
        records.push(record.clone());
        Ok(record.clone())
    }

    async fn list(&self) -> Result<Vec<Record>> {
        Ok(self.records.read().clone())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::record::NewRecord;

    fn record(name: &str) -> Record {
        Record::new(NewRecord {
            name: name.into(),
            age: 41,
            address: "2 Side St".into(),
            phone_number: "555-0101".into(),
        })
    }

    #[tokio::test]
    async fn test_create_returns_same_record() {
        let repo = MemoryRecordRepository::new();
        let input = record("Bob");

        let stored = repo.create(&input).await.unwrap();

        assert_eq!(stored, input);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_create_inserts_exactly_one_row_per_call() {
        let repo = MemoryRecordRepository::new();
        repo.create(&record("a")).await.unwrap();
        repo.create(&record("b")).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let repo = MemoryRecordRepository::new();
        let input = record("Carol");
        repo.create(&input).await.unwrap();

        let err = repo.create(&input).await.unwrap_err();

        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let repo = MemoryRecordRepository::new();
        repo.create(&record("a")).await.unwrap();
        repo.create(&record("b")).await.unwrap();

        let mut first: Vec<_> = repo.list().await.unwrap().into_iter().map(|r| r.id).collect();
        let mut second: Vec<_> = repo.list().await.unwrap().into_iter().map(|r| r.id).collect();
        first.sort();
        second.sort();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_list() {
        let repo = MemoryRecordRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(repo.is_empty());
        assert!(repo.ping().await.is_ok());
    }
}
