//! Record kinds managed by the console.
//!
//! Each record kind implements [`Resource`], which tells the generic store
//! adapter and the stores how to key, create, patch and describe it. The
//! column lists returned here are what ends up as query parameters in the
//! query log, so they follow the table's declared column order.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{RegistrarError, RegistrarResult};

mod course;
mod department;
mod enrollment;
mod faculty;
mod student;

pub use course::{Course, CourseDraft, CoursePatch};
pub use department::{Department, DepartmentDraft, DepartmentPatch};
pub use enrollment::{Enrollment, EnrollmentDraft, EnrollmentPatch};
pub use faculty::{Faculty, FacultyDraft, FacultyPatch};
pub use student::{Student, StudentDraft, StudentPatch};

/// Primary key of a record kind.
pub trait RecordKey:
    Clone + Ord + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Value bound into query parameters.
    fn to_param(&self) -> Value;

    /// Parse from the textual form used by storage keys and the CLI.
    fn parse(s: &str) -> RegistrarResult<Self>;

    /// Next store-assigned key after the current maximum, if this key kind
    /// is assigned by the store at all.
    fn next_after(last: Option<&Self>) -> Option<Self>;
}

impl RecordKey for u64 {
    fn to_param(&self) -> Value {
        Value::from(*self)
    }

    fn parse(s: &str) -> RegistrarResult<Self> {
        s.trim()
            .parse()
            .map_err(|e| RegistrarError::InvalidKey(format!("'{}': {}", s, e)))
    }

    fn next_after(last: Option<&Self>) -> Option<Self> {
        Some(last.map_or(1, |k| k + 1))
    }
}

impl RecordKey for String {
    fn to_param(&self) -> Value {
        Value::String(self.clone())
    }

    fn parse(s: &str) -> RegistrarResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RegistrarError::InvalidKey("empty key".into()));
        }
        Ok(s.to_string())
    }

    // Natural keys are always supplied by the caller
    fn next_after(_last: Option<&Self>) -> Option<Self> {
        None
    }
}

/// A record kind: one table, one key, a create shape and a partial-update shape.
pub trait Resource:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Primary key type
    type Key: RecordKey;
    /// Fields accepted on create
    type Draft: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Partial update; every field optional
    type Patch: Clone + fmt::Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Table name used in synthesized queries and storage
    const TABLE: &'static str;
    /// Key column name
    const KEY_COLUMN: &'static str;

    /// Primary key of this record.
    fn key(&self) -> Self::Key;

    /// Key carried by the draft itself (natural keys such as course codes).
    fn draft_key(_draft: &Self::Draft) -> Option<Self::Key> {
        None
    }

    /// Columns written on create, in declared order.
    fn draft_columns(draft: &Self::Draft) -> Vec<(&'static str, Value)>;

    /// Columns present in the patch, in declared order.
    fn patch_columns(patch: &Self::Patch) -> Vec<(&'static str, Value)>;

    /// Reject drafts missing required fields.
    fn validate(_draft: &Self::Draft) -> RegistrarResult<()> {
        Ok(())
    }

    /// Reject patches that would break the same rules on fields they set.
    fn validate_patch(_patch: &Self::Patch) -> RegistrarResult<()> {
        Ok(())
    }

    /// Build the stored record once its key is known.
    fn from_draft(key: Self::Key, draft: Self::Draft) -> Self;

    /// Merge a partial update into the record.
    fn apply(&mut self, patch: Self::Patch);

    /// Value that must be unique across the table (e.g. email), if any.
    fn unique_value(&self) -> Option<String> {
        None
    }
}

/// `(name, value)` pair for a column list.
pub(crate) fn column<T: Serialize>(name: &'static str, value: &T) -> (&'static str, Value) {
    (name, serde_json::to_value(value).unwrap_or(Value::Null))
}

/// Push a patch column only when the field is present.
pub(crate) fn push_present<T: Serialize>(
    columns: &mut Vec<(&'static str, Value)>,
    name: &'static str,
    value: &Option<T>,
) {
    if let Some(v) = value {
        columns.push(column(name, v));
    }
}

pub(crate) fn require(field: &str, value: &str) -> RegistrarResult<()> {
    if value.trim().is_empty() {
        return Err(RegistrarError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// [`require`] for a patch field, when present.
pub(crate) fn require_present(field: &str, value: &Option<String>) -> RegistrarResult<()> {
    match value {
        Some(v) => require(field, v),
        None => Ok(()),
    }
}

pub(crate) fn require_email(value: &str) -> RegistrarResult<()> {
    require("email", value)?;
    if !value.contains('@') {
        return Err(RegistrarError::Validation(format!(
            "'{}' is not an email address",
            value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_key_assignment() {
        assert_eq!(u64::next_after(None), Some(1));
        assert_eq!(u64::next_after(Some(&41)), Some(42));
        assert_eq!(<u64 as RecordKey>::parse(" 7 ").unwrap(), 7);
        assert!(<u64 as RecordKey>::parse("seven").is_err());
    }

    #[test]
    fn test_natural_key_is_never_assigned() {
        assert_eq!(String::next_after(None), None);
        assert_eq!(<String as RecordKey>::parse("CS101").unwrap(), "CS101");
        assert!(<String as RecordKey>::parse("  ").is_err());
    }

    #[test]
    fn test_push_present_skips_missing() {
        let mut columns = Vec::new();
        push_present::<String>(&mut columns, "name", &None);
        push_present(&mut columns, "year", &Some(2024));
        assert_eq!(columns, vec![("year", Value::from(2024))]);
    }

    #[test]
    fn test_require_present_skips_missing() {
        assert!(require_present("name", &None).is_ok());
        assert!(require_present("name", &Some("Physics".into())).is_ok());
        assert!(matches!(
            require_present("name", &Some(" ".into())),
            Err(RegistrarError::Validation(_))
        ));
    }

    #[test]
    fn test_require_email() {
        assert!(require_email("ada@example.edu").is_ok());
        assert!(matches!(
            require_email("ada"),
            Err(RegistrarError::Validation(_))
        ));
        assert!(require_email("").is_err());
    }
}
