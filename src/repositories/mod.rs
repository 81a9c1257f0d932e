// Repositories module - data access layer

pub mod id_allocator;
pub mod resource_repository;


pub use id_allocator::IdAllocator;
pub use resource_repository::{InMemoryRepository, ResourceRepository};
