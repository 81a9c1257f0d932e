use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

use super::{service_error_to_response, ApiError, Validated};
use crate::models::{parse_route_id, CreateProductRequest, Product, ResourceId, ServiceError};
use crate::services::ProductService;

/// Application state for product handlers
#[derive(Clone)]
pub struct ProductState {
    pub product_service: Arc<ProductService>,
}

/// Create the product router
pub fn create_product_router(product_service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/:product_id", get(get_product))
        .with_state(ProductState { product_service })
}

/// List all products keyed by id
#[instrument(name = "list_products", skip(state))]
pub async fn list_products(
    State(state): State<ProductState>,
) -> Result<Json<BTreeMap<ResourceId, Product>>, ApiError> {
    state
        .product_service
        .list()
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Get a product by ID. Only digit strings can name a product.
#[instrument(name = "get_product", skip(state))]
pub async fn get_product(
    State(state): State<ProductState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_route_id(&product_id)
        .ok_or_else(|| service_error_to_response(ServiceError::NotFound { resource: "Product" }))?;

    state
        .product_service
        .get(id)
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Create a new product
#[instrument(name = "create_product", skip(state, request), fields(product.name = %request.name))]
pub async fn create_product(
    State(state): State<ProductState>,
    Validated(request): Validated<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    state
        .product_service
        .create(request)
        .await
        .map(|product| (StatusCode::CREATED, Json(product)))
        .map_err(service_error_to_response)
}
