use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::error;

use crate::models::ServiceError;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<Value>);

/// Convert ServiceError to HTTP response
pub fn service_error_to_response(err: ServiceError) -> ApiError {
    match err {
        ServiceError::SchemaValidation { violations } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": violations })),
        ),
        ServiceError::InvalidRequestFormat { .. }
        | ServiceError::MissingField { .. }
        | ServiceError::InvalidFieldValue { .. } => error_body(StatusCode::BAD_REQUEST, &err),
        ServiceError::NotFound { .. } => error_body(StatusCode::NOT_FOUND, &err),
        ServiceError::EmailConflict { .. } => error_body(StatusCode::CONFLICT, &err),
        ServiceError::Repository { ref source } => {
            error!(error = %source, "Resource store failure");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, &err)
        }
    }
}

fn error_body(status: StatusCode, err: &ServiceError) -> ApiError {
    let message = match err {
        ServiceError::Repository { source } => source.to_string(),
        other => other.to_string(),
    };
    (status, Json(json!({ "error": message })))
}
