use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info, Instrument};

use super::IdAllocator;
use crate::models::{RepositoryError, RepositoryResult, Resource, ResourceId};

/// Trait defining the interface for resource data access operations
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// All records keyed by id, in ascending id order
    async fn list(&self) -> RepositoryResult<BTreeMap<ResourceId, R>>;

    /// Find a record by its id
    async fn find_by_id(&self, id: ResourceId) -> RepositoryResult<Option<R>>;

    /// Allocate an id, build the record from `draft` and store it
    async fn create(&self, draft: R::Draft) -> RepositoryResult<R>;

    /// Number of stored records
    async fn len(&self) -> RepositoryResult<usize>;
}

struct StoreState<R> {
    records: BTreeMap<ResourceId, R>,
    allocator: IdAllocator,
}

/// In-memory implementation of the ResourceRepository trait.
///
/// Allocation and insertion happen under a single write lock, so concurrent
/// creations never observe the same id.
pub struct InMemoryRepository<R: Resource> {
    state: RwLock<StoreState<R>>,
}

impl<R: Resource> InMemoryRepository<R> {
    /// Create a store seeded with `records`, allocating new ids with `allocator`
    pub fn new(allocator: IdAllocator, records: impl IntoIterator<Item = R>) -> Self {
        let records: BTreeMap<ResourceId, R> = records
            .into_iter()
            .map(|record| (record.id(), record))
            .collect();

        info!(
            resource = R::KIND,
            policy = allocator.policy_name(),
            seeded = records.len(),
            "Initialized in-memory store"
        );

        Self {
            state: RwLock::new(StoreState { records, allocator }),
        }
    }

    /// Empty store allocating ids from a counter starting at 1
    pub fn with_counter() -> Self {
        Self::new(IdAllocator::counter(), Vec::new())
    }

    /// Seeded store allocating `max(existing) + 1`
    pub fn with_fixtures(fixtures: Vec<R>) -> Self {
        Self::new(IdAllocator::MaxPlusOne, fixtures)
    }

    fn create_store_span(&self, operation: &str) -> tracing::Span {
        tracing::debug_span!(
            "store",
            "store.resource" = R::KIND,
            "store.operation" = operation,
            "otel.kind" = "internal",
            "otel.name" = %format!("{}Store.{}", R::KIND, operation),
        )
    }
}

#[async_trait]
impl<R: Resource> ResourceRepository<R> for InMemoryRepository<R> {
    async fn list(&self) -> RepositoryResult<BTreeMap<ResourceId, R>> {
        async {
            let state = self.state.read().await;
            debug!(count = state.records.len(), "Listing records");
            Ok(state.records.clone())
        }
        .instrument(self.create_store_span("List"))
        .await
    }

    async fn find_by_id(&self, id: ResourceId) -> RepositoryResult<Option<R>> {
        async {
            let state = self.state.read().await;
            Ok(state.records.get(&id).cloned())
        }
        .instrument(self.create_store_span("Get"))
        .await
    }

    async fn create(&self, draft: R::Draft) -> RepositoryResult<R> {
        async {
            let mut state = self.state.write().await;
            let StoreState { records, allocator } = &mut *state;

            let id = allocator.next_id(records, R::KIND)?;
            let record = R::from_draft(id, draft);
            records.insert(id, record.clone());

            debug!(id, "Stored new record");
            Ok::<_, RepositoryError>(record)
        }
        .instrument(self.create_store_span("Create"))
        .await
    }

    async fn len(&self) -> RepositoryResult<usize> {
        Ok(self.state.read().await.records.len())
    }
}
