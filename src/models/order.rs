use serde::{Deserialize, Serialize};

use super::{OrderStatus, Resource, ResourceId};

/// Customer order. `user_id` and `product_id` are not checked against the
/// other services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: ResourceId,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub status: OrderStatus,
}

/// Payload for placing an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

impl Resource for Order {
    type Draft = CreateOrderRequest;

    const KIND: &'static str = "Order";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn from_draft(id: ResourceId, draft: CreateOrderRequest) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            product_id: draft.product_id,
            quantity: draft.quantity,
            status: OrderStatus::Created,
        }
    }
}
