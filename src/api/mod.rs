//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod pipeline;
pub mod response;
pub mod routes;

use crate::api::app_state::AppState;
use crate::observability::create_observability_router;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.max_request_size;

    Router::new()
        .merge(routes::record_routes::create_record_router())
        .merge(create_observability_router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
