use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

use crate::observability::Metrics;

const PROMETHEUS_TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Expose this service's registry in Prometheus text format
pub async fn metrics_handler(State(metrics): State<Arc<Metrics>>) -> Response {
    let exposition = match metrics.encode() {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "Metrics exposition failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics")
                .into_response();
        }
    };

    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT_FORMAT)], exposition).into_response()
}
