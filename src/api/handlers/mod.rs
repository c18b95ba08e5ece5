//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod record_handler;

pub use record_handler::*;
