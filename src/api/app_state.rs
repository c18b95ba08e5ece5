use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::record_repository::RecordRepository;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway for person records
    pub repository: Arc<dyn RecordRepository>,
    /// Deadline applied to each persistence call
    pub request_timeout: Duration,
    /// Maximum accepted request body, in bytes
    pub max_request_size: usize,
    /// Service version reported by `/version`
    pub version: String,
    /// Process start time
    pub started_at: DateTime<Utc>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("repository", &"Arc<dyn RecordRepository>")
            .field("request_timeout", &self.request_timeout)
            .field("max_request_size", &self.max_request_size)
            .field("version", &self.version)
            .field("started_at", &self.started_at)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        request_timeout: Duration,
        max_request_size: usize,
    ) -> Self {
        Self {
            repository,
            request_timeout,
            max_request_size,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// Create state with development defaults around the given repository
    pub fn development(repository: Arc<dyn RecordRepository>) -> Self {
        Self::new(repository, Duration::from_secs(10), 64 * 1024)
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    /// Run a persistence call under the per-request deadline
    pub async fn with_deadline<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(format!(
                "{operation} exceeded {}ms",
                self.request_timeout.as_millis()
            ))),
        }
    }
}
