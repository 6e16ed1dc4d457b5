use anyhow::Result;

use crate::model::{Document, Record, RecordId, User};

/// Uniform persistence surface for one record collection. Every backend
/// exposes the same six operations per collection; which collection is
/// meant is picked by the record type.
#[async_trait::async_trait]
pub trait CollectionStore<R: Record>: Send + Sync {
    /// All records, ordered by identifier.
    async fn list(&self) -> Result<Vec<R>>;
    async fn get(&self, id: RecordId) -> Result<Option<R>>;
    /// Records matching every present predicate of an already normalized
    /// filter, ordered by identifier.
    async fn find(&self, filter: &R::Filter) -> Result<Vec<R>>;
    /// Insert with a backend-assigned identifier and return the stored
    /// record, identifier included.
    async fn insert(&self, record: R) -> Result<R>;
    /// Overwrite the record at the identifier the record carries. The
    /// record must carry one.
    async fn replace(&self, record: R) -> Result<()>;
    /// Remove by identifier; false when nothing was there.
    async fn delete(&self, id: RecordId) -> Result<bool>;
}

pub trait Store: CollectionStore<User> + CollectionStore<Document> + Send + Sync {}
