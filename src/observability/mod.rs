//! 可观测性模块
//!
//! 提供结构化日志初始化和健康检查端点。

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Serialize;
use std::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use crate::api::app_state::AppState;
use crate::config::config::LoggingConfig;
use crate::error::{AppError, Result};

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: i64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub name: String,
    pub healthy: bool,
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// 耗时毫秒数，超出 u64 时取最大值
fn elapsed_millis(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// 检查存储是否可达
async fn check_storage(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let result = state
        .with_deadline("storage ping", state.repository.ping())
        .await;
    let latency_ms = elapsed_millis(start);

    match result {
        Ok(()) => HealthCheck {
            name: "storage".to_string(),
            healthy: true,
            message: None,
            latency_ms,
        },
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            HealthCheck {
                name: "storage".to_string(),
                healthy: false,
                message: Some(e.to_string()),
                latency_ms,
            }
        }
    }
}

/// 获取完整健康状态
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks = vec![check_storage(&state).await];
    let all_healthy = checks.iter().all(|c| c.healthy);

    let health_status = HealthStatus {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查（检查存储）
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if check_storage(&state).await.healthy {
        (StatusCode::OK, "Ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// 版本信息端点
pub async fn version(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": state.version,
        "uptimeSeconds": state.uptime_seconds(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/version", get(version))
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于 `logging.level`。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 需持有到进程退出。
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Config(format!("invalid log level: {}", e)))?;

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "person-records.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AppError::Config(format!("failed to install tracing subscriber: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serializes_camel_case() {
        let status = HealthStatus {
            status: "healthy".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            version: "0.1.0".to_string(),
            uptime_seconds: 3600,
            checks: vec![HealthCheck {
                name: "storage".to_string(),
                healthy: true,
                message: None,
                latency_ms: 3,
            }],
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["uptimeSeconds"], 3600);
        assert_eq!(json["checks"][0]["latencyMs"], 3);
    }

    #[test]
    fn test_elapsed_millis_counts_from_start() {
        let start = Instant::now() - std::time::Duration::from_millis(25);
        assert!(elapsed_millis(start) >= 25);
    }

    #[test]
    fn test_invalid_log_level_is_config_error() {
        // RUST_LOG takes precedence over the configured level
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "person_records=verbose".into(),
            ..LoggingConfig::default()
        };
        assert!(matches!(init_tracing(&config), Err(AppError::Config(_))));
    }
}
