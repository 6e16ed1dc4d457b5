use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::{anyhow, Result};
use parking_lot::RwLock;

use crate::model::{Document, DocumentFilter, Record, RecordId, User, UserFilter};
use crate::store::traits::{CollectionStore, Store};

/// One collection held in memory. Identifiers count up from 1, the same
/// sequence a fresh database would assign. The map is keyed by identifier,
/// so iteration order is identifier order.
struct Collection<R> {
    next_id: AtomicI64,
    records: RwLock<BTreeMap<RecordId, R>>,
}

impl<R: Record> Collection<R> {
    fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            records: RwLock::new(BTreeMap::new()),
        }
    }

    fn list(&self) -> Vec<R> {
        self.records.read().values().cloned().collect()
    }

    fn get(&self, id: RecordId) -> Option<R> {
        self.records.read().get(&id).cloned()
    }

    fn find(&self, filter: &R::Filter) -> Vec<R> {
        self.records
            .read()
            .values()
            .filter(|record| record.matches(filter))
            .cloned()
            .collect()
    }

    fn insert(&self, mut record: R) -> R {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        record.set_id(id);
        self.records.write().insert(id, record.clone());
        record
    }

    fn replace(&self, record: R) -> Result<()> {
        let id = record
            .id()
            .ok_or_else(|| anyhow!("cannot replace a record without an identifier"))?;
        self.records.write().insert(id, record);
        Ok(())
    }

    fn delete(&self, id: RecordId) -> bool {
        self.records.write().remove(&id).is_some()
    }
}

/// Non-durable backend keeping both collections behind locks. The locks are
/// only held for the map operation itself, never across an await.
pub struct MemoryStore {
    users: Collection<User>,
    documents: Collection<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: Collection::new(),
            documents: Collection::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CollectionStore<User> for MemoryStore {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.list())
    }

    async fn get(&self, id: RecordId) -> Result<Option<User>> {
        Ok(self.users.get(id))
    }

    async fn find(&self, filter: &UserFilter) -> Result<Vec<User>> {
        Ok(self.users.find(filter))
    }

    async fn insert(&self, record: User) -> Result<User> {
        Ok(self.users.insert(record))
    }

    async fn replace(&self, record: User) -> Result<()> {
        self.users.replace(record)
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        Ok(self.users.delete(id))
    }
}

#[async_trait::async_trait]
impl CollectionStore<Document> for MemoryStore {
    async fn list(&self) -> Result<Vec<Document>> {
        Ok(self.documents.list())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Document>> {
        Ok(self.documents.get(id))
    }

    async fn find(&self, filter: &DocumentFilter) -> Result<Vec<Document>> {
        Ok(self.documents.find(filter))
    }

    async fn insert(&self, record: Document) -> Result<Document> {
        Ok(self.documents.insert(record))
    }

    async fn replace(&self, record: Document) -> Result<()> {
        self.documents.replace(record)
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        Ok(self.documents.delete(id))
    }
}

impl Store for MemoryStore {}
