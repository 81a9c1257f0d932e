pub mod extract;
pub mod health;
pub mod metrics;
pub mod middleware;
pub mod orders;
pub mod payments;
pub mod products;
pub mod response;
pub mod users;

pub use extract::Validated;
pub use health::{health_check, service_info};
pub use metrics::metrics_handler;
pub use middleware::{request_size_middleware, security_headers_middleware};
pub use orders::create_order_router;
pub use payments::create_payment_router;
pub use products::create_product_router;
pub use response::{service_error_to_response, ApiError};
pub use users::create_user_router;
