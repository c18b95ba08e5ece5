//! 存储层模块
//!
//! 提供 PostgreSQL 连接池、表结构迁移以及按配置选择存储后端。

pub mod factory;
pub mod migration;
pub mod postgres;
