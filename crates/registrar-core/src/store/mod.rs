//! Record stores wrapped by the store adapters.
//!
//! A [`Collaborator`] is anything that can list, read, create, patch and
//! delete records of one kind. Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: in-memory mock, used for demos and tests
//! - [`RedbStore`]: persists records in a redb database so they survive
//!   restarts (the query log itself is never persisted)

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::{RegistrarError, RegistrarResult};
use crate::records::{RecordKey, Resource};

mod memory;
mod persistent;

pub use memory::MemoryStore;
pub use persistent::{open_database, RedbStore};

/// CRUD surface of a record store.
pub trait Collaborator<R: Resource>: Send + Sync {
    /// Every record, in key order.
    fn fetch_all(&self) -> impl Future<Output = RegistrarResult<Vec<R>>> + Send;

    /// One record by key.
    fn fetch_one(&self, key: &R::Key) -> impl Future<Output = RegistrarResult<R>> + Send;

    /// Create a record, assigning its key when the kind uses store-assigned keys.
    fn create(&self, draft: R::Draft) -> impl Future<Output = RegistrarResult<R>> + Send;

    /// Merge a partial update and return the updated record.
    fn update(
        &self,
        key: &R::Key,
        patch: R::Patch,
    ) -> impl Future<Output = RegistrarResult<R>> + Send;

    /// Remove a record.
    fn delete(&self, key: &R::Key) -> impl Future<Output = RegistrarResult<()>> + Send;
}

/// Either kind of built-in store, so a console can be memory- or disk-backed
/// without changing its adapter types.
pub enum RecordStore<R: Resource> {
    /// In-memory
    Memory(MemoryStore<R>),
    /// redb-backed
    Persistent(RedbStore<R>),
}

impl<R: Resource> Collaborator<R> for RecordStore<R> {
    async fn fetch_all(&self) -> RegistrarResult<Vec<R>> {
        match self {
            RecordStore::Memory(store) => store.fetch_all().await,
            RecordStore::Persistent(store) => store.fetch_all().await,
        }
    }

    async fn fetch_one(&self, key: &R::Key) -> RegistrarResult<R> {
        match self {
            RecordStore::Memory(store) => store.fetch_one(key).await,
            RecordStore::Persistent(store) => store.fetch_one(key).await,
        }
    }

    async fn create(&self, draft: R::Draft) -> RegistrarResult<R> {
        match self {
            RecordStore::Memory(store) => store.create(draft).await,
            RecordStore::Persistent(store) => store.create(draft).await,
        }
    }

    async fn update(&self, key: &R::Key, patch: R::Patch) -> RegistrarResult<R> {
        match self {
            RecordStore::Memory(store) => store.update(key, patch).await,
            RecordStore::Persistent(store) => store.update(key, patch).await,
        }
    }

    async fn delete(&self, key: &R::Key) -> RegistrarResult<()> {
        match self {
            RecordStore::Memory(store) => store.delete(key).await,
            RecordStore::Persistent(store) => store.delete(key).await,
        }
    }
}

/// Pick the key for a new record: the draft's natural key, or the next
/// store-assigned key past both the current maximum and the high-water mark
/// (so keys of deleted records are not handed out again).
pub(crate) fn assign_key<R: Resource>(
    draft: &R::Draft,
    records: &BTreeMap<R::Key, R>,
    high_water: Option<&R::Key>,
) -> RegistrarResult<R::Key> {
    if let Some(key) = R::draft_key(draft) {
        if records.contains_key(&key) {
            return Err(RegistrarError::Conflict(format!(
                "{} '{}' already exists",
                R::TABLE,
                key
            )));
        }
        return Ok(key);
    }

    let last = match (records.keys().next_back(), high_water) {
        (Some(a), Some(b)) => Some(std::cmp::max(a, b)),
        (a, b) => a.or(b),
    };
    <R::Key as RecordKey>::next_after(last).ok_or_else(|| {
        RegistrarError::InvalidKey(format!("{} records need an explicit key", R::TABLE))
    })
}

/// Reject `candidate` if another record already holds its unique value.
pub(crate) fn check_unique<'a, R: Resource>(
    records: impl IntoIterator<Item = &'a R>,
    candidate: &R,
) -> RegistrarResult<()> {
    let Some(value) = candidate.unique_value() else {
        return Ok(());
    };
    let candidate_key = candidate.key();

    for other in records {
        if other.key() != candidate_key && other.unique_value().as_deref() == Some(value.as_str())
        {
            return Err(RegistrarError::Conflict(format!(
                "{} with '{}' already exists",
                R::TABLE,
                value
            )));
        }
    }
    Ok(())
}
