use axum::{extract::State, response::Json, routing::post, Router};
use std::sync::Arc;
use tracing::instrument;

use super::Validated;
use crate::models::{PaymentRequest, PaymentTransaction};
use crate::services::PaymentService;

/// Application state for payment handlers
#[derive(Clone)]
pub struct PaymentState {
    pub payment_service: Arc<PaymentService>,
}

/// Create the payment router
pub fn create_payment_router(payment_service: Arc<PaymentService>) -> Router {
    Router::new()
        .route("/payments/process", post(process_payment))
        .with_state(PaymentState { payment_service })
}

/// Process a payment with the mock processor
#[instrument(name = "process_payment", skip(state, request))]
pub async fn process_payment(
    State(state): State<PaymentState>,
    Validated(request): Validated<PaymentRequest>,
) -> Json<PaymentTransaction> {
    Json(state.payment_service.process(request))
}
