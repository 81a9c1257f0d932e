// Services module - business logic layer

pub mod payment_service;
pub mod resource_service;
pub mod user_service;

pub use payment_service::PaymentService;
pub use resource_service::{OrderService, ProductService, ResourceService};
pub use user_service::UserService;
