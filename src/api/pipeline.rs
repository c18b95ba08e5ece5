//! Request Pipeline
//!
//! Decodes a JSON request body into a payload type and checks the
//! constraints declared on its fields with `#[validate(...)]`.
//! Either stage can be used on its own; [`handle_body`] runs both.

use axum::response::{IntoResponse, Response};
use heck::ToLowerCamelCase;
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Pipeline failure, rendered as `400 Bad Request`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Malformed JSON or a shape mismatch.
    #[error("malformed request body: {0}")]
    Decode(String),

    /// Well-formed payload that violates a field constraint.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl PipelineError {
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ValidationErrors> for PipelineError {
    fn from(errors: ValidationErrors) -> Self {
        PipelineError::Validation(describe(&errors))
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Renders field errors as `field: message`, sorted by field name.
///
/// Field names are reported as they appear on the wire (camelCase).
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons = errs
                .iter()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => err.code.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            (field.to_lower_camel_case(), reasons)
        })
        .collect();
    fields.sort();

    fields
        .into_iter()
        .map(|(field, reasons)| format!("{field}: {reasons}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parses `body` as JSON into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, PipelineError> {
    serde_json::from_slice(body).map_err(|e| PipelineError::Decode(e.to_string()))
}

/// Checks the constraints declared on `T`.
pub fn validate<T: Validate>(payload: &T) -> Result<(), PipelineError> {
    payload.validate().map_err(PipelineError::from)
}

/// Decode then validate. A decode failure returns before validation runs.
pub fn handle_body<T>(body: &[u8]) -> Result<T, PipelineError>
where
    T: DeserializeOwned + Validate,
{
    let payload: T = decode(body)?;
    validate(&payload)?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Deserialize, Validate, PartialEq)]
    struct Probe {
        #[validate(length(min = 1, message = "label must not be empty"))]
        label: String,
        #[validate(range(min = 1, max = 10))]
        weight: u8,
    }

    static CUSTOM_CALLS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug, Deserialize)]
    struct Counted {
        #[allow(dead_code)]
        value: i64,
    }

    impl Validate for Counted {
        fn validate(&self) -> Result<(), ValidationErrors> {
            CUSTOM_CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_handle_body_accepts_valid_payload() {
        let probe: Probe = handle_body(br#"{"label":"x","weight":3}"#).unwrap();
        assert_eq!(
            probe,
            Probe {
                label: "x".into(),
                weight: 3
            }
        );
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = handle_body::<Probe>(b"{\"label\":").unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().starts_with("malformed request body"));
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let err = handle_body::<Probe>(br#"{"label":"x","weight":"heavy"}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_decode_failure_skips_validation() {
        let before = CUSTOM_CALLS.load(Ordering::SeqCst);
        assert!(handle_body::<Counted>(b"not json").is_err());
        assert_eq!(CUSTOM_CALLS.load(Ordering::SeqCst), before);

        assert!(handle_body::<Counted>(br#"{"value":1}"#).is_ok());
        assert_eq!(CUSTOM_CALLS.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_validation_error_names_every_field() {
        let err = handle_body::<Probe>(br#"{"label":"","weight":42}"#).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "validation failed: label: label must not be empty; weight: range"
        );
    }

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Contact {
        #[validate(length(min = 1, message = "must not be empty"))]
        display_name: String,
        #[validate(length(min = 1, message = "must not be empty"))]
        email: String,
    }

    #[test]
    fn test_validation_error_uses_wire_field_names() {
        let err = handle_body::<Contact>(br#"{"displayName":"","email":""}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation failed: displayName: must not be empty; email: must not be empty"
        );
    }

    #[test]
    fn test_stages_are_usable_independently() {
        let probe: Probe = decode(br#"{"label":"","weight":3}"#).unwrap();
        assert!(validate(&probe).is_err());
    }

    #[test]
    fn test_pipeline_error_renders_400() {
        let response = PipelineError::Decode("eof".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
