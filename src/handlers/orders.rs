use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::instrument;

use super::{service_error_to_response, ApiError, Validated};
use crate::models::{parse_path_id, CreateOrderRequest, Order, ServiceError};
use crate::services::OrderService;

/// Application state for order handlers
#[derive(Clone)]
pub struct OrderState {
    pub order_service: Arc<OrderService>,
}

/// Create the order router
pub fn create_order_router(order_service: Arc<OrderService>) -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/:order_id", get(get_order))
        .with_state(OrderState { order_service })
}

/// Place an order. Responds 200 with the stored order.
#[instrument(
    name = "create_order",
    skip(state, request),
    fields(order.user_id = request.user_id, order.product_id = request.product_id)
)]
pub async fn create_order(
    State(state): State<OrderState>,
    Validated(request): Validated<CreateOrderRequest>,
) -> Result<Json<Order>, ApiError> {
    state
        .order_service
        .create(request)
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Get an order by ID
#[instrument(name = "get_order", skip(state))]
pub async fn get_order(
    State(state): State<OrderState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_path_id(&order_id, "order_id")
        .map_err(|err| service_error_to_response(err.into()))?
        .ok_or_else(|| service_error_to_response(ServiceError::NotFound { resource: "Order" }))?;

    state
        .order_service
        .get(id)
        .await
        .map(Json)
        .map_err(service_error_to_response)
}
