//! Page components for Registrar.

mod courses;
mod dashboard;
mod departments;
mod enrollments;
mod faculty;
mod students;

pub use courses::Courses;
pub use dashboard::Dashboard;
pub use departments::Departments;
pub use enrollments::Enrollments;
pub use faculty::FacultyPage;
pub use students::Students;

use std::str::FromStr;

/// Trimmed text, or `None` when blank.
fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Parse an optional numeric field; blank means absent.
fn parse_optional<T: FromStr>(label: &str, s: &str) -> Result<Option<T>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| format!("{} must be a number", label))
}

/// Parse a required numeric field.
fn parse_required<T: FromStr>(label: &str, s: &str) -> Result<T, String> {
    parse_optional(label, s)?.ok_or_else(|| format!("{} is required", label))
}

/// `Some(new)` when it differs from `old`; patches carry only changed fields.
fn changed<T: PartialEq>(new: T, old: &T) -> Option<T> {
    (new != *old).then_some(new)
}

/// Like [`changed`] for optional fields; clearing a field is not expressible
/// in a patch, so a blank input leaves it alone.
fn changed_opt<T: PartialEq>(new: Option<T>, old: &Option<T>) -> Option<T> {
    match new {
        Some(value) if old.as_ref() != Some(&value) => Some(value),
        _ => None,
    }
}

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}
