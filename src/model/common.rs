/// Identifier assigned by the storage layer on insert, unique within a
/// collection and immutable afterwards. Clients never supply it; a value
/// sent on create is discarded.
pub type RecordId = i64;
