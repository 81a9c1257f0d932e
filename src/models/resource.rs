use serde::Serialize;

/// Integer key of a stored record
pub type ResourceId = u64;

/// A record type that can live in a resource store.
///
/// Records are built from a validated draft once the store has allocated
/// their id, so the stored `id` always equals the map key.
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    /// Validated creation payload
    type Draft: Send + 'static;

    /// Name used in error messages and metrics, e.g. "Product"
    const KIND: &'static str;

    fn id(&self) -> ResourceId;

    fn from_draft(id: ResourceId, draft: Self::Draft) -> Self;
}
