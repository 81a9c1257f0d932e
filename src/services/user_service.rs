use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use super::ResourceService;
use crate::models::{CreateUserRequest, ResourceId, ServiceError, ServiceResult, User};
use crate::observability::Metrics;
use crate::repositories::ResourceRepository;

/// Service for managing users.
///
/// Email uniqueness is only checked when `enforce_unique_email` is set.
pub struct UserService {
    users: ResourceService<User>,
    enforce_unique_email: bool,
    creation_lock: Mutex<()>,
}

impl UserService {
    /// Create a new UserService
    pub fn new(repository: Arc<dyn ResourceRepository<User>>, enforce_unique_email: bool) -> Self {
        Self::from_resource_service(ResourceService::new(repository), enforce_unique_email)
    }

    /// Create a new UserService that records operation metrics
    pub fn new_with_metrics(
        repository: Arc<dyn ResourceRepository<User>>,
        metrics: Arc<Metrics>,
        enforce_unique_email: bool,
    ) -> Self {
        Self::from_resource_service(
            ResourceService::new_with_metrics(repository, metrics),
            enforce_unique_email,
        )
    }

    fn from_resource_service(users: ResourceService<User>, enforce_unique_email: bool) -> Self {
        Self {
            users,
            enforce_unique_email,
            creation_lock: Mutex::new(()),
        }
    }

    pub fn enforces_unique_email(&self) -> bool {
        self.enforce_unique_email
    }

    /// List all users keyed by id
    pub async fn list_users(&self) -> ServiceResult<BTreeMap<ResourceId, User>> {
        self.users.list().await
    }

    /// Get a specific user by id
    pub async fn get_user(&self, id: ResourceId) -> ServiceResult<User> {
        self.users.get(id).await
    }

    /// Create a new user
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<User> {
        if !self.enforce_unique_email {
            return self.users.create(request).await;
        }

        // Check and insert must not interleave with another creation
        let _guard = self.creation_lock.lock().await;

        let existing = self.users.snapshot().await?;
        if existing.values().any(|user| user.has_email(&request.email)) {
            warn!(email = %request.email, "Rejected user with duplicate email");
            return Err(ServiceError::EmailConflict {
                email: request.email,
            });
        }

        self.users.create(request).await
    }
}
