//! Record API Handlers
//!
//! HTTP handlers for creating and listing person records.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Response,
};
use tracing::{debug, info};

use crate::{
    api::{
        app_state::AppState,
        dto::record_dto::{CreateRecordRequest, RecordResponse},
        pipeline,
        response::write_json,
    },
    error::AppError,
    models::record::Record,
};

/// Create a person record
///
/// POST /person
///
/// An empty body creates a record filled with generated data.
pub async fn create_record(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let record = if body.iter().all(u8::is_ascii_whitespace) {
        debug!("Empty body, generating a synthetic record");
        Record::fake()
    } else {
        let request: CreateRecordRequest = pipeline::handle_body(&body)?;
        Record::new(request.into_new_record()?)
    };

    info!(id = %record.id, "Creating record");

    let created = state
        .with_deadline("create record", state.repository.create(&record))
        .await?;

    Ok(write_json(
        &RecordResponse::from(created),
        StatusCode::CREATED,
    ))
}

/// List all person records
///
/// GET /person
pub async fn list_records(State(state): State<AppState>) -> Result<Response, AppError> {
    let records = state
        .with_deadline("list records", state.repository.list())
        .await?;

    info!(count = records.len(), "Listing records");

    let response: Vec<RecordResponse> = records.into_iter().map(RecordResponse::from).collect();

    Ok(write_json(&response, StatusCode::OK))
}
