use crate::domain::error::DomainError;
use crate::domain::store::retrieval_store::RetrievalStore;

/// Durable copy of the index and corpus. Both are always written and read
/// together.
pub trait SnapshotStore: Send + Sync {
    /// `Ok(None)` when no usable snapshot exists. Partial or corrupt
    /// snapshots are reported as `None`, never as an error.
    fn load(&self) -> Result<Option<RetrievalStore>, DomainError>;

    fn save(&self, store: &RetrievalStore) -> Result<(), DomainError>;
}
