use axum::response::Json;
use serde_json::{json, Value};
use tracing::instrument;

use crate::models::ServiceKind;

/// Liveness probe. The body is exactly `{"status": "healthy"}`.
#[instrument(name = "health_check")]
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Root endpoint describing the service and its routes
pub async fn service_info(kind: ServiceKind) -> Json<Value> {
    let endpoints = match kind {
        ServiceKind::Product => json!({
            "list_products": "/products",
            "get_product": "/products/<id>",
            "create_product": "/products (POST)",
        }),
        ServiceKind::User => json!({
            "list_users": "/users",
            "get_user": "/users/<id>",
            "create_user": "/users (POST)",
        }),
        ServiceKind::Order => json!({
            "create_order": "/orders (POST)",
            "get_order": "/orders/<id>",
        }),
        ServiceKind::Payment => json!({
            "process_payment": "/payments/process (POST)",
        }),
    };

    Json(json!({
        "service": kind.display_name(),
        "status": "running",
        "endpoints": endpoints,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
