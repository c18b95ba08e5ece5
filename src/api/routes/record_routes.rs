//! Record Routes

use axum::{Router, routing::get};

use crate::api::app_state::AppState;
use crate::api::handlers::record_handler::*;

/// 创建人员记录路由器
pub fn create_record_router() -> Router<AppState> {
    Router::new().route("/person", get(list_records).post(create_record))
}
