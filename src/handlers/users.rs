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
use crate::models::{parse_path_id, CreateUserRequest, ResourceId, ServiceError, User};
use crate::services::UserService;

/// Application state for user handlers
#[derive(Clone)]
pub struct UserState {
    pub user_service: Arc<UserService>,
}

/// Create the user router
pub fn create_user_router(user_service: Arc<UserService>) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:user_id", get(get_user))
        .with_state(UserState { user_service })
}

/// List all users keyed by id
#[instrument(name = "list_users", skip(state))]
pub async fn list_users(
    State(state): State<UserState>,
) -> Result<Json<BTreeMap<ResourceId, User>>, ApiError> {
    state
        .user_service
        .list_users()
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Get a user by ID
#[instrument(name = "get_user", skip(state))]
pub async fn get_user(
    State(state): State<UserState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_path_id(&user_id, "user_id")
        .map_err(|err| service_error_to_response(err.into()))?
        .ok_or_else(|| service_error_to_response(ServiceError::NotFound { resource: "User" }))?;

    state
        .user_service
        .get_user(id)
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Register a new user
#[instrument(name = "create_user", skip(state, request))]
pub async fn create_user(
    State(state): State<UserState>,
    Validated(request): Validated<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    state
        .user_service
        .create_user(request)
        .await
        .map(|user| (StatusCode::CREATED, Json(user)))
        .map_err(service_error_to_response)
}
