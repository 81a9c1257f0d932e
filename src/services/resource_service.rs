use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{Order, Product, Resource, ResourceId, ServiceError, ServiceResult};
use crate::observability::Metrics;
use crate::repositories::ResourceRepository;

/// Service for products
pub type ProductService = ResourceService<Product>;

/// Service for orders
pub type OrderService = ResourceService<Order>;

/// List/get/create operations over one resource store
pub struct ResourceService<R: Resource> {
    repository: Arc<dyn ResourceRepository<R>>,
    metrics: Option<Arc<Metrics>>,
}

impl<R: Resource> ResourceService<R> {
    /// Create a new service
    pub fn new(repository: Arc<dyn ResourceRepository<R>>) -> Self {
        Self {
            repository,
            metrics: None,
        }
    }

    /// Create a new service that records operation metrics
    pub fn new_with_metrics(
        repository: Arc<dyn ResourceRepository<R>>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            repository,
            metrics: Some(metrics),
        }
    }

    /// List every record keyed by id
    #[instrument(skip(self), fields(resource = R::KIND))]
    pub async fn list(&self) -> ServiceResult<BTreeMap<ResourceId, R>> {
        let result = self.repository.list().await.map_err(ServiceError::from);
        self.record("list", &result);

        let records = result?;
        crate::info_with_trace!("Listed {} {} records", records.len(), R::KIND);
        Ok(records)
    }

    /// Get a record by id
    #[instrument(skip(self), fields(resource = R::KIND))]
    pub async fn get(&self, id: ResourceId) -> ServiceResult<R> {
        let result = match self.repository.find_by_id(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(ServiceError::NotFound { resource: R::KIND }),
            Err(err) => Err(err.into()),
        };
        self.record("get", &result);

        if let Err(ServiceError::NotFound { .. }) = &result {
            crate::warn_with_trace!("{} {} not found", R::KIND, id);
        }
        result
    }

    /// Store a new record built from a validated draft
    #[instrument(skip(self, draft), fields(resource = R::KIND))]
    pub async fn create(&self, draft: R::Draft) -> ServiceResult<R> {
        let result = self
            .repository
            .create(draft)
            .await
            .map_err(ServiceError::from);
        self.record("create", &result);

        match &result {
            Ok(record) => {
                crate::info_with_trace!("{} created successfully with ID: {}", R::KIND, record.id())
            }
            Err(err) => crate::error_with_trace!("Failed to create {}: {}", R::KIND, err),
        }
        result
    }

    /// Current records for internal checks; not counted as a client operation
    pub(crate) async fn snapshot(&self) -> ServiceResult<BTreeMap<ResourceId, R>> {
        Ok(self.repository.list().await?)
    }

    /// Number of stored records
    pub async fn count(&self) -> ServiceResult<usize> {
        Ok(self.repository.len().await?)
    }

    fn record<T>(&self, operation: &str, result: &ServiceResult<T>) {
        if let Some(metrics) = &self.metrics {
            metrics.record_resource_operation(R::KIND, operation, result.is_ok());
        }
    }
}
