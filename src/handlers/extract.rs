use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::warn;

use super::service_error_to_response;
use crate::models::{RequestModel, ServiceError};

/// Extractor that builds a `RequestModel` from the request body.
///
/// Manual and schema-validated payloads are rejected through the same
/// error mapping as handler errors.
#[derive(Debug)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: RequestModel + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        // Covers bodies without a declared length that outgrow the body limit
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            warn!(status = %rejection.status(), "Failed to read request body");
            (
                rejection.status(),
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response()
        })?;

        T::from_request_body(content_type.as_deref(), &body)
            .map(Validated)
            .map_err(|err| service_error_to_response(ServiceError::from(err)).into_response())
    }
}
