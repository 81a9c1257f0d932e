use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::models::{
    PaymentRequest, PaymentStatus, PaymentTransaction, TRANSACTION_ID_MAX_LENGTH,
    TRANSACTION_ID_PREFIX,
};
use crate::observability::Metrics;

/// Stateless mock payment processor
#[derive(Default)]
pub struct PaymentService {
    metrics: Option<Arc<Metrics>>,
}

impl PaymentService {
    pub fn new() -> Self {
        Self { metrics: None }
    }

    pub fn new_with_metrics(metrics: Arc<Metrics>) -> Self {
        Self {
            metrics: Some(metrics),
        }
    }

    /// Process a payment. Always succeeds; the amount is passed through
    /// without being checked, only logged when it is not a positive number.
    #[instrument(skip(self, request))]
    pub fn process(&self, request: PaymentRequest) -> PaymentTransaction {
        if !request.has_positive_amount() {
            warn!(amount = %request.amount, "Processing payment with a non-positive or non-numeric amount");
        }

        let transaction = PaymentTransaction {
            transaction_id: generate_transaction_id(),
            amount: request.amount,
            currency: request.currency,
            status: PaymentStatus::Success,
        };

        if let Some(metrics) = &self.metrics {
            let currency = transaction.currency.as_str().unwrap_or("unknown");
            metrics.record_payment(currency);
        }

        crate::info_with_trace!(
            transaction_id = %transaction.transaction_id,
            "Payment processed"
        );
        transaction
    }
}

/// Short random transaction token: the `txn_` prefix followed by hex digits
/// of a v4 UUID, at most 20 characters long
pub fn generate_transaction_id() -> String {
    let mut id = format!("{}{}", TRANSACTION_ID_PREFIX, Uuid::new_v4().simple());
    id.truncate(TRANSACTION_ID_MAX_LENGTH);
    id
}
