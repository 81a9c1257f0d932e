use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order. Orders are created once and never transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Created,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "created"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(OrderStatus::Created),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

/// Outcome of a payment. The mock processor only ever succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Success,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "success"),
        }
    }
}

/// The independent services this binary can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Product,
    User,
    Order,
    Payment,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::Product,
        ServiceKind::User,
        ServiceKind::Order,
        ServiceKind::Payment,
    ];

    /// Human readable name reported by the root endpoint
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::Product => "Product Service",
            ServiceKind::User => "User Service",
            ServiceKind::Order => "Order Service",
            ServiceKind::Payment => "Payment Service",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Product => write!(f, "product"),
            ServiceKind::User => write!(f, "user"),
            ServiceKind::Order => write!(f, "order"),
            ServiceKind::Payment => write!(f, "payment"),
        }
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" | "products" => Ok(ServiceKind::Product),
            "user" | "users" => Ok(ServiceKind::User),
            "order" | "orders" => Ok(ServiceKind::Order),
            "payment" | "payments" => Ok(ServiceKind::Payment),
            _ => Err(format!("Invalid service kind: {}", s)),
        }
    }
}
