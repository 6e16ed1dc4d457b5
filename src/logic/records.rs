use crate::model::{scrub_candidate_id, Record, RecordFilter, RecordId};
use crate::store::traits::CollectionStore;

/// Failure surface of the record operations. Storage faults keep their
/// context chain; a missing record is its own case so callers can map it
/// to the right response.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Record not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct RecordOperations;

impl RecordOperations {
    /// List every record in the collection, ordered by identifier.
    pub async fn list<R: Record, S: CollectionStore<R>>(store: &S) -> Result<Vec<R>, RecordError> {
        let records = store.list().await?;
        Ok(records)
    }

    /// Fetch a single record by identifier.
    pub async fn get<R: Record, S: CollectionStore<R>>(
        store: &S,
        id: RecordId,
    ) -> Result<R, RecordError> {
        store.get(id).await?.ok_or(RecordError::NotFound)
    }

    /// Find records matching every present predicate of the filter. The
    /// filter is normalized first, so blank predicates never constrain the
    /// result; a filter with nothing left matches the whole collection.
    pub async fn find<R: Record, S: CollectionStore<R>>(
        store: &S,
        filter: R::Filter,
    ) -> Result<Vec<R>, RecordError> {
        let filter = filter.normalized();
        let records = store.find(&filter).await?;
        Ok(records)
    }

    /// Store a new record. Any identifier the candidate carries is
    /// discarded; the storage layer assigns the real one. Returns the
    /// record as stored.
    pub async fn create<R: Record, S: CollectionStore<R>>(
        store: &S,
        mut candidate: R,
    ) -> Result<R, RecordError> {
        scrub_candidate_id(&mut candidate);
        let created = store.insert(candidate).await?;
        log::debug!("created {} record {:?}", R::COLLECTION, created.id());
        Ok(created)
    }

    /// Merge the candidate's present fields into the stored record. Absent
    /// fields keep their stored values and the identifier is never touched.
    pub async fn update<R: Record, S: CollectionStore<R>>(
        store: &S,
        id: RecordId,
        candidate: R,
    ) -> Result<(), RecordError> {
        let Some(mut existing) = store.get(id).await? else {
            return Err(RecordError::NotFound);
        };
        existing.apply_update(candidate);
        store.replace(existing).await?;
        Ok(())
    }

    /// Remove a record by identifier.
    pub async fn delete<R: Record, S: CollectionStore<R>>(
        store: &S,
        id: RecordId,
    ) -> Result<(), RecordError> {
        if store.delete(id).await? {
            log::debug!("deleted {} record {}", R::COLLECTION, id);
            Ok(())
        } else {
            Err(RecordError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{User, UserFilter};
    use crate::store::memory::MemoryStore;

    fn user(username: &str) -> User {
        User {
            username: Some(username.to_string()),
            active: Some(true),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_identifiers_and_ignores_the_client_one() {
        let store = MemoryStore::new();

        let mut candidate = user("alice");
        candidate.id = Some(999);
        let created = RecordOperations::create(&store, candidate).await.unwrap();
        assert_eq!(created.id, Some(1));

        let second = RecordOperations::create(&store, user("bob")).await.unwrap();
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn get_reports_not_found_for_unknown_identifiers() {
        let store = MemoryStore::new();
        let err = RecordOperations::get::<User, _>(&store, 42)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NotFound));
    }

    #[tokio::test]
    async fn update_merges_into_the_stored_record() {
        let store = MemoryStore::new();
        let created = RecordOperations::create(
            &store,
            User {
                first_name: Some("Alice".to_string()),
                last_name: Some("Archer".to_string()),
                username: Some("alice".to_string()),
                active: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let id = created.id.unwrap();

        RecordOperations::update(
            &store,
            id,
            User {
                last_name: Some("Baker".to_string()),
                active: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stored = RecordOperations::get::<User, _>(&store, id).await.unwrap();
        assert_eq!(stored.last_name.as_deref(), Some("Baker"));
        assert_eq!(stored.first_name.as_deref(), Some("Alice"));
        assert_eq!(stored.username.as_deref(), Some("alice"));
        assert_eq!(stored.id, Some(id));
    }

    #[tokio::test]
    async fn update_and_delete_report_not_found() {
        let store = MemoryStore::new();

        let err = RecordOperations::update(&store, 7, user("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NotFound));

        let err = RecordOperations::delete::<User, _>(&store, 7)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = MemoryStore::new();
        let created = RecordOperations::create(&store, user("carol")).await.unwrap();
        let id = created.id.unwrap();

        RecordOperations::delete::<User, _>(&store, id).await.unwrap();

        let err = RecordOperations::get::<User, _>(&store, id)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NotFound));
    }

    #[tokio::test]
    async fn find_drops_blank_predicates_before_matching() {
        let store = MemoryStore::new();
        RecordOperations::create(&store, user("alice")).await.unwrap();
        RecordOperations::create(&store, user("bob")).await.unwrap();

        // A blank predicate constrains nothing.
        let all = RecordOperations::find::<User, _>(
            &store,
            UserFilter {
                username: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(all.len(), 2);

        let just_bob = RecordOperations::find::<User, _>(
            &store,
            UserFilter {
                username: Some("bob".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(just_bob.len(), 1);
        assert_eq!(just_bob[0].username.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn list_returns_records_in_identifier_order() {
        let store = MemoryStore::new();
        for name in ["carol", "alice", "bob"] {
            RecordOperations::create(&store, user(name)).await.unwrap();
        }

        let all = RecordOperations::list::<User, _>(&store).await.unwrap();
        let ids: Vec<_> = all.iter().filter_map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
