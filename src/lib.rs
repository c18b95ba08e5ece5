//! Person Records - 人员记录服务
//!
//! 基于关系型数据库的最小 HTTP 服务，提供人员记录的创建与列出。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod storage;
