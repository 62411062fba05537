//! Store adapter: wraps a record store and logs every completed call.
//!
//! ```text
//! caller ──► StoreAdapter::update(7, patch)
//!              │
//!              ├── collaborator.update(7, patch).await ──► Err ──► warn!, no entry
//!              │                                          Ok
//!              └── logger.append(UPDATE, "UPDATE t SET .. WHERE id = ?", [.., 7])
//! ```
//!
//! The query text is synthesized from the resource's table and column
//! names; nothing is ever executed. A future dropped before the collaborator
//! finishes never reaches the append, so cancelled calls leave no entry.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{RegistrarError, RegistrarResult};
use crate::query_log::{Operation, QueryLogger};
use crate::records::{RecordKey, Resource};
use crate::store::Collaborator;

/// Instrumented CRUD surface over one record kind.
pub struct StoreAdapter<R: Resource, C: Collaborator<R>> {
    collaborator: C,
    logger: Arc<QueryLogger>,
    _kind: std::marker::PhantomData<fn() -> R>,
}

impl<R: Resource, C: Collaborator<R>> StoreAdapter<R, C> {
    /// Wrap `collaborator`, depositing entries into `logger`.
    pub fn new(collaborator: C, logger: Arc<QueryLogger>) -> Self {
        Self {
            collaborator,
            logger,
            _kind: std::marker::PhantomData,
        }
    }

    /// The shared query log.
    pub fn logger(&self) -> &Arc<QueryLogger> {
        &self.logger
    }

    /// The wrapped store, for calls that must not be logged.
    pub fn collaborator(&self) -> &C {
        &self.collaborator
    }

    /// List every record.
    pub async fn fetch_all(&self) -> RegistrarResult<Vec<R>> {
        let records = self
            .collaborator
            .fetch_all()
            .await
            .inspect_err(|e| warn_failed::<R>("fetch_all", e))?;

        self.logger
            .append(Operation::Select, select_all_sql(R::TABLE), vec![]);
        Ok(records)
    }

    /// Read one record by key.
    pub async fn fetch_one(&self, key: &R::Key) -> RegistrarResult<R> {
        let record = self
            .collaborator
            .fetch_one(key)
            .await
            .inspect_err(|e| warn_failed::<R>("fetch_one", e))?;

        self.logger.append(
            Operation::Select,
            select_one_sql(R::TABLE, R::KEY_COLUMN),
            vec![key.to_param()],
        );
        Ok(record)
    }

    /// Create a record and return it with its assigned key.
    pub async fn create(&self, draft: R::Draft) -> RegistrarResult<R> {
        let (names, params): (Vec<_>, Vec<_>) = R::draft_columns(&draft).into_iter().unzip();

        let record = self
            .collaborator
            .create(draft)
            .await
            .inspect_err(|e| warn_failed::<R>("create", e))?;

        self.logger
            .append(Operation::Insert, insert_sql(R::TABLE, &names), params);
        Ok(record)
    }

    /// Apply a partial update and return the merged record.
    ///
    /// Logged params are the values present in the patch, followed by the key.
    /// A patch with no fields is rejected before the store is called.
    pub async fn update(&self, key: &R::Key, patch: R::Patch) -> RegistrarResult<R> {
        let (names, mut params): (Vec<_>, Vec<Value>) =
            R::patch_columns(&patch).into_iter().unzip();
        if names.is_empty() {
            let error = RegistrarError::Validation("nothing to update".into());
            warn_failed::<R>("update", &error);
            return Err(error);
        }
        params.push(key.to_param());

        let record = self
            .collaborator
            .update(key, patch)
            .await
            .inspect_err(|e| warn_failed::<R>("update", e))?;

        self.logger.append(
            Operation::Update,
            update_sql(R::TABLE, &names, R::KEY_COLUMN),
            params,
        );
        Ok(record)
    }

    /// Delete a record.
    pub async fn delete(&self, key: &R::Key) -> RegistrarResult<()> {
        self.collaborator
            .delete(key)
            .await
            .inspect_err(|e| warn_failed::<R>("delete", e))?;

        self.logger.append(
            Operation::Delete,
            delete_sql(R::TABLE, R::KEY_COLUMN),
            vec![key.to_param()],
        );
        Ok(())
    }
}

fn warn_failed<R: Resource>(call: &'static str, error: &RegistrarError) {
    tracing::warn!(table = R::TABLE, call, %error, "store call failed; not logged");
}

fn select_all_sql(table: &str) -> String {
    format!("SELECT * FROM {}", table)
}

fn select_one_sql(table: &str, key_column: &str) -> String {
    format!("SELECT * FROM {} WHERE {} = ?", table, key_column)
}

fn insert_sql(table: &str, columns: &[&str]) -> String {
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

fn update_sql(table: &str, columns: &[&str], key_column: &str) -> String {
    let assignments = columns
        .iter()
        .map(|c| format!("{} = ?", c))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE {} SET {} WHERE {} = ?", table, assignments, key_column)
}

fn delete_sql(table: &str, key_column: &str) -> String {
    format!("DELETE FROM {} WHERE {} = ?", table, key_column)
}
