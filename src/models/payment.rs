use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PaymentStatus;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const TRANSACTION_ID_PREFIX: &str = "txn_";
pub const TRANSACTION_ID_MAX_LENGTH: usize = 20;

/// Payment request. `amount` and `currency` are carried through as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Value,
    pub currency: Value,
}

/// Result of processing a payment; never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub transaction_id: String,
    pub amount: Value,
    pub currency: Value,
    pub status: PaymentStatus,
}

impl PaymentRequest {
    /// Whether the amount is a strictly positive number. The processor only
    /// warns when this is false.
    pub fn has_positive_amount(&self) -> bool {
        self.amount.as_f64().map(|a| a > 0.0).unwrap_or(false)
    }
}
