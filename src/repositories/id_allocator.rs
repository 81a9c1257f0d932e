use std::collections::BTreeMap;

use crate::models::{RepositoryError, RepositoryResult, ResourceId};

/// Strategy used by a store to pick the id of the next record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdAllocator {
    /// One past the largest existing key. Requires a non-empty store.
    MaxPlusOne,
    /// Monotonic counter independent of the store contents
    Counter { next: ResourceId },
}

impl IdAllocator {
    /// Counter starting at 1
    pub fn counter() -> Self {
        IdAllocator::Counter { next: 1 }
    }

    /// Allocate the next id for a store holding `existing`.
    ///
    /// The caller must hold the store's write lock until the record is
    /// inserted.
    pub fn next_id<R>(
        &mut self,
        existing: &BTreeMap<ResourceId, R>,
        resource: &'static str,
    ) -> RepositoryResult<ResourceId> {
        match self {
            IdAllocator::MaxPlusOne => {
                let max = existing
                    .keys()
                    .next_back()
                    .copied()
                    .ok_or(RepositoryError::EmptyStore { resource })?;
                max.checked_add(1)
                    .ok_or(RepositoryError::IdSpaceExhausted { resource })
            }
            IdAllocator::Counter { next } => {
                let id = *next;
                *next = id
                    .checked_add(1)
                    .ok_or(RepositoryError::IdSpaceExhausted { resource })?;
                Ok(id)
            }
        }
    }

    pub fn policy_name(&self) -> &'static str {
        match self {
            IdAllocator::MaxPlusOne => "max_plus_one",
            IdAllocator::Counter { .. } => "counter",
        }
    }
}
