//! Response Writer
//!
//! Uniform JSON responses. A body that fails to serialize is logged and
//! answered with a 500; it never takes the process down.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// Serializes `data` as the JSON body of a response with `status`.
pub fn write_json<T: Serialize + ?Sized>(data: &T, status: StatusCode) -> Response {
    match serde_json::to_vec(data) {
        Ok(body) => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            body,
        )
            .into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
