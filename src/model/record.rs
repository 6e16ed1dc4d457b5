use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::RecordId;

/// A storable entity with a server-assigned identifier, field-merge update
/// semantics and an equality filter. The record service and both storage
/// backends are generic over this trait, so each collection implements it
/// once and shares all operation logic.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Ad-hoc lookup predicates for this collection.
    type Filter: RecordFilter;

    /// Collection (table) name in storage.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<RecordId>;

    fn set_id(&mut self, id: RecordId);

    fn clear_id(&mut self);

    /// Merge a candidate into this record: fields present on the candidate
    /// overwrite, absent fields are preserved, and the identifier is never
    /// touched. Collections may carve out exceptions (the user active flag
    /// is always taken from the candidate).
    fn apply_update(&mut self, candidate: Self);

    /// Whether this record satisfies every predicate of a normalized
    /// filter. Used by the in-memory backend; the relational backend
    /// expresses the same predicates as SQL.
    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// A set of optional predicates that are ANDed together. A filter with no
/// predicates matches every record in the collection.
pub trait RecordFilter: Clone + Send + Sync + DeserializeOwned + 'static {
    /// Drop predicates that impose no constraint, i.e. empty-string values
    /// supplied for equality fields.
    fn normalized(self) -> Self;
}
