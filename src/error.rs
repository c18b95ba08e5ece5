//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::pipeline::PipelineError;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求体解码或校验失败
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// 持久化错误（数据库不可达、约束冲突等）
    #[error("persistence error: {0}")]
    Persistence(String),

    /// 超时错误
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// 配置错误
    #[error("configuration error: {0}")]
    Config(String),

    /// 序列化错误
    #[error("serialization error: {0}")]
    Serialization(String),

    /// 内部错误
    #[error("internal error: {0}")]
    Internal(String),

    /// IO 错误
    #[error("io error: {0}")]
    Io(String),
}

impl AppError {
    /// HTTP 状态码映射
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Pipeline(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_)
            | AppError::Timeout(_)
            | AppError::Serialization(_)
            | AppError::Internal(_)
            | AppError::Config(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Persistence(e.to_string())
    }
}

/// Plain-text error body with the mapped status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed: {}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "request rejected: {}", self);
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_error_maps_to_500() {
        let err = AppError::Persistence("connection refused".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "persistence error: connection refused");
    }

    #[test]
    fn pipeline_error_maps_to_400() {
        let err: AppError = PipelineError::Validation("age: range".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "validation failed: age: range");
    }

    #[test]
    fn sqlx_error_becomes_persistence_error() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[test]
    fn into_response_is_plain_text() {
        let response = AppError::Timeout("list".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
