//! 核心数据模型模块
//!
//! 定义人员记录 Record 及其仓储。

pub mod record;
pub mod record_repository;

pub use record::*;
pub use record_repository::{MemoryRecordRepository, PgRecordRepository, RecordRepository};
