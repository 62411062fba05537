//! redb-backed record store.
//!
//! Every record kind gets its own table named after [`Resource::TABLE`],
//! keyed by the key's display form, with JSON-encoded values. A shared
//! `key_high_water` table remembers the largest key each kind has handed out.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};

use super::{assign_key, check_unique, Collaborator};
use crate::error::{RegistrarError, RegistrarResult};
use crate::records::Resource;

const KEY_HIGH_WATER_TABLE: TableDefinition<&str, &str> = TableDefinition::new("key_high_water");

/// Open (or create) the database file at `path`.
///
/// Creates the parent directory if it doesn't exist.
pub fn open_database(path: impl AsRef<Path>) -> RegistrarResult<Arc<Database>> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::create(path)?;

    let write_txn = db.begin_write()?;
    {
        let _ = write_txn.open_table(KEY_HIGH_WATER_TABLE)?;
    }
    write_txn.commit()?;

    tracing::debug!(path = %path.display(), "opened record database");
    Ok(Arc::new(db))
}

/// Record store persisted in a redb database.
pub struct RedbStore<R: Resource> {
    db: Arc<Database>,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Resource> RedbStore<R> {
    /// Wrap a shared database, creating this kind's table if needed.
    pub fn new(db: Arc<Database>) -> RegistrarResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(Self::table())?;
        }
        write_txn.commit()?;

        Ok(Self {
            db,
            _kind: PhantomData,
        })
    }

    fn table() -> TableDefinition<'static, &'static str, &'static [u8]> {
        TableDefinition::new(R::TABLE)
    }
}

fn load_all<R: Resource>(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
) -> RegistrarResult<BTreeMap<R::Key, R>> {
    let mut records = BTreeMap::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        let record: R = serde_json::from_slice(value.value())?;
        records.insert(record.key(), record);
    }
    Ok(records)
}

impl<R: Resource> Collaborator<R> for RedbStore<R> {
    async fn fetch_all(&self) -> RegistrarResult<Vec<R>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(Self::table())?;
        // Storage keys sort as text; return records in key order instead
        Ok(load_all::<R>(&table)?.into_values().collect())
    }

    async fn fetch_one(&self, key: &R::Key) -> RegistrarResult<R> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(Self::table())?;

        let found = table.get(key.to_string().as_str())?;
        match found {
            Some(v) => Ok(serde_json::from_slice(v.value())?),
            None => Err(RegistrarError::not_found(R::TABLE, key)),
        }
    }

    async fn create(&self, draft: R::Draft) -> RegistrarResult<R> {
        R::validate(&draft)?;

        let write_txn = self.db.begin_write()?;
        let record = {
            let mut table = write_txn.open_table(Self::table())?;
            let mut high_water = write_txn.open_table(KEY_HIGH_WATER_TABLE)?;

            let existing = load_all::<R>(&table)?;
            let last: Option<R::Key> = match high_water.get(R::TABLE)? {
                Some(v) => Some(serde_json::from_str(v.value())?),
                None => None,
            };

            let key = assign_key::<R>(&draft, &existing, last.as_ref())?;
            let record = R::from_draft(key.clone(), draft);
            check_unique(existing.values(), &record)?;

            let data = serde_json::to_vec(&record)?;
            table.insert(key.to_string().as_str(), data.as_slice())?;
            if last.as_ref().map_or(true, |hw| key > *hw) {
                let encoded = serde_json::to_string(&key)?;
                high_water.insert(R::TABLE, encoded.as_str())?;
            }
            record
        };
        write_txn.commit()?;
        Ok(record)
    }

    async fn update(&self, key: &R::Key, patch: R::Patch) -> RegistrarResult<R> {
        R::validate_patch(&patch)?;
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut table = write_txn.open_table(Self::table())?;
            let existing = load_all::<R>(&table)?;

            let mut updated = existing
                .get(key)
                .cloned()
                .ok_or_else(|| RegistrarError::not_found(R::TABLE, key))?;
            updated.apply(patch);
            check_unique(existing.values(), &updated)?;

            let data = serde_json::to_vec(&updated)?;
            table.insert(key.to_string().as_str(), data.as_slice())?;
            updated
        };
        write_txn.commit()?;
        Ok(updated)
    }

    async fn delete(&self, key: &R::Key) -> RegistrarResult<()> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(Self::table())?;
            let removed = table.remove(key.to_string().as_str())?.is_some();
            removed
        };
        if !removed {
            write_txn.abort()?;
            return Err(RegistrarError::not_found(R::TABLE, key));
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Course, CourseDraft, CoursePatch, Department, DepartmentDraft};
    use tempfile::TempDir;

    fn temp_db() -> (TempDir, Arc<Database>) {
        let dir = TempDir::new().unwrap();
        let db = open_database(dir.path().join("registrar.redb")).unwrap();
        (dir, db)
    }

    fn dept(name: &str) -> DepartmentDraft {
        DepartmentDraft {
            name: name.into(),
            head: None,
        }
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("registrar.redb");

        {
            let store = RedbStore::<Department>::new(open_database(&path).unwrap()).unwrap();
            store.create(dept("Physics")).await.unwrap();
            store.create(dept("History")).await.unwrap();
        }

        let store = RedbStore::<Department>::new(open_database(&path).unwrap()).unwrap();
        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Physics");

        let next = store.create(dept("Biology")).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn test_fetch_all_in_numeric_key_order() {
        let (_dir, db) = temp_db();
        let store = RedbStore::<Department>::new(db).unwrap();
        for i in 0..11 {
            store.create(dept(&format!("Dept {}", i))).await.unwrap();
        }

        let ids: Vec<u64> = store
            .fetch_all()
            .await
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, (1..=11).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_delete_does_not_reuse_ids() {
        let (_dir, db) = temp_db();
        let store = RedbStore::<Department>::new(db).unwrap();
        store.create(dept("Physics")).await.unwrap();
        let second = store.create(dept("History")).await.unwrap();

        store.delete(&second.id).await.unwrap();
        assert!(store.fetch_one(&second.id).await.unwrap_err().is_not_found());
        assert!(store.delete(&second.id).await.unwrap_err().is_not_found());

        let third = store.create(dept("Biology")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_natural_key_update_and_conflict() {
        let (_dir, db) = temp_db();
        let store = RedbStore::<Course>::new(db).unwrap();
        let draft = CourseDraft {
            code: "CS101".into(),
            name: "Intro".into(),
            credits: 3,
            ..Default::default()
        };
        store.create(draft.clone()).await.unwrap();
        assert!(matches!(
            store.create(draft).await.unwrap_err(),
            RegistrarError::Conflict(_)
        ));

        let updated = store
            .update(
                &"CS101".to_string(),
                CoursePatch {
                    credits: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.credits, 4);
        assert_eq!(store.fetch_one(&"CS101".to_string()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_invalid_patch_leaves_stored_record() {
        let (_dir, db) = temp_db();
        let store = RedbStore::<Course>::new(db).unwrap();
        let created = store
            .create(CourseDraft {
                code: "MA201".into(),
                name: "Linear Algebra".into(),
                credits: 4,
                ..Default::default()
            })
            .await
            .unwrap();

        let err = store
            .update(
                &created.code,
                CoursePatch {
                    name: Some("  ".into()),
                    credits: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrarError::Validation(_)));
        assert_eq!(store.fetch_one(&created.code).await.unwrap(), created);
    }
}
