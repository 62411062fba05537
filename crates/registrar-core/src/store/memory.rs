//! In-memory record store.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::{assign_key, check_unique, Collaborator};
use crate::error::{RegistrarError, RegistrarResult};
use crate::records::Resource;

struct MemoryState<R: Resource> {
    records: BTreeMap<R::Key, R>,
    high_water: Option<R::Key>,
}

/// Record store kept entirely in memory.
///
/// Behaves like the persistent store: store-assigned keys start at 1 and
/// are never reused, natural keys and unique fields are enforced.
pub struct MemoryStore<R: Resource> {
    state: RwLock<MemoryState<R>>,
}

impl<R: Resource> MemoryStore<R> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                records: BTreeMap::new(),
                high_water: None,
            }),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }
}

impl<R: Resource> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> Collaborator<R> for MemoryStore<R> {
    async fn fetch_all(&self) -> RegistrarResult<Vec<R>> {
        Ok(self.state.read().records.values().cloned().collect())
    }

    async fn fetch_one(&self, key: &R::Key) -> RegistrarResult<R> {
        self.state
            .read()
            .records
            .get(key)
            .cloned()
            .ok_or_else(|| RegistrarError::not_found(R::TABLE, key))
    }

    async fn create(&self, draft: R::Draft) -> RegistrarResult<R> {
        R::validate(&draft)?;

        let mut state = self.state.write();
        let key = assign_key::<R>(&draft, &state.records, state.high_water.as_ref())?;
        let record = R::from_draft(key.clone(), draft);
        check_unique(state.records.values(), &record)?;

        let raise = match state.high_water {
            Some(ref hw) => key > *hw,
            None => true,
        };
        if raise {
            state.high_water = Some(key.clone());
        }
        state.records.insert(key, record.clone());
        Ok(record)
    }

    async fn update(&self, key: &R::Key, patch: R::Patch) -> RegistrarResult<R> {
        R::validate_patch(&patch)?;
        let mut state = self.state.write();

        let mut updated = state
            .records
            .get(key)
            .cloned()
            .ok_or_else(|| RegistrarError::not_found(R::TABLE, key))?;
        updated.apply(patch);
        check_unique(state.records.values(), &updated)?;

        state.records.insert(key.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, key: &R::Key) -> RegistrarResult<()> {
        self.state
            .write()
            .records
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| RegistrarError::not_found(R::TABLE, key))
    }
}
