use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};
use tracing::info;

use crate::config::Config;
use crate::handlers::{
    create_order_router, create_payment_router, create_product_router, create_user_router,
    health_check, metrics_handler, request_size_middleware, security_headers_middleware,
    service_info,
};
use crate::models::{product_fixtures, user_fixtures, ServiceKind};
use crate::observability::{observability_middleware, Metrics, MetricsError};
use crate::repositories::InMemoryRepository;
use crate::services::{OrderService, PaymentService, ProductService, UserService};

/// Per-service settings drawn from the process configuration
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub request_timeout: Duration,
    pub max_request_size: usize,
    pub enforce_unique_email: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(crate::config::default_timeout()),
            max_request_size: crate::config::default_max_request_size(),
            enforce_unique_email: false,
        }
    }
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout: config.server.request_timeout(),
            max_request_size: config.server.max_request_size,
            enforce_unique_email: config.services.enforce_unique_email,
        }
    }
}

/// Build the router for one service with its own store and metrics registry.
///
/// Every call starts from fresh state: product and user stores are seeded
/// with their fixtures, the order store is empty.
pub fn create_app(kind: ServiceKind, settings: &AppSettings) -> Result<Router, MetricsError> {
    let metrics = Arc::new(Metrics::for_service(&kind.to_string())?);
    let metrics_for_middleware = metrics.clone();

    let service_router = match kind {
        ServiceKind::Product => {
            let repository = Arc::new(InMemoryRepository::with_fixtures(product_fixtures()));
            create_product_router(Arc::new(ProductService::new_with_metrics(
                repository,
                metrics.clone(),
            )))
        }
        ServiceKind::User => {
            let repository = Arc::new(InMemoryRepository::with_fixtures(user_fixtures()));
            create_user_router(Arc::new(UserService::new_with_metrics(
                repository,
                metrics.clone(),
                settings.enforce_unique_email,
            )))
        }
        ServiceKind::Order => {
            let repository = Arc::new(InMemoryRepository::with_counter());
            create_order_router(Arc::new(OrderService::new_with_metrics(
                repository,
                metrics.clone(),
            )))
        }
        ServiceKind::Payment => create_payment_router(Arc::new(
            PaymentService::new_with_metrics(metrics.clone()),
        )),
    };

    info!(service = %kind, "Router initialized");

    let max_request_size = settings.max_request_size;

    Ok(Router::new()
        .route("/", get(move || service_info(kind)))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        .merge(service_router)
        // Layers run outer to inner in reverse order of declaration; security
        // headers sit outermost so rejections by inner layers carry them too
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(middleware::from_fn(move |req, next| {
            request_size_middleware(max_request_size, req, next)
        }))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
        .layer(middleware::from_fn(security_headers_middleware)))
}
