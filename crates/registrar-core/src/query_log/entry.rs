//! Query log entry types.
//!
//! A [`QueryLogEntry`] is the immutable record of one simulated database
//! operation issued by a store adapter. Entries are created by the
//! [`QueryLogger`](super::QueryLogger) and never mutated afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

/// Classification of a query's intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Read
    Select,
    /// Create
    Insert,
    /// Modify
    Update,
    /// Remove
    Delete,
    /// Anything the classifier could not recognise
    Unknown,
}

impl Operation {
    /// All operation kinds, in display order.
    pub const ALL: [Operation; 5] = [
        Operation::Select,
        Operation::Insert,
        Operation::Update,
        Operation::Delete,
        Operation::Unknown,
    ];

    /// Upper-case verb used in badges and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Select => "SELECT",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Unknown => "UNKNOWN",
        }
    }

    /// Whether the operation changes stored data.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::Insert | Operation::Update | Operation::Delete
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identifier for a query log entry.
///
/// Only used for keying entries in the UI; it carries no ordering meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogId(pub Ulid);

impl LogId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for LogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single logged query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLogEntry {
    /// Unique id, stable for the entry's lifetime in the buffer
    pub id: LogId,
    /// Human-readable query text (not necessarily executable)
    pub sql: String,
    /// Values bound to the query's placeholders, in order
    pub params: Vec<Value>,
    /// Intent classification
    pub operation: Operation,
    /// Simulated (or externally measured) execution time in milliseconds
    pub duration_ms: f64,
    /// Capture time; non-decreasing in insertion order
    pub timestamp: DateTime<Utc>,
}

impl QueryLogEntry {
    /// Time of day formatted for the debugger panel (`HH:MM:SS.mmm`).
    pub fn time_of_day(&self) -> String {
        self.timestamp.format("%H:%M:%S%.3f").to_string()
    }

    /// Params rendered as pretty-printed JSON, or `None` when there are none.
    pub fn params_pretty(&self) -> Option<String> {
        if self.params.is_empty() {
            return None;
        }
        serde_json::to_string_pretty(&self.params).ok()
    }
}

/// A query description handed to the logger before it becomes an entry.
///
/// Descriptions arriving in bulk (e.g. from a server response) may omit the
/// operation, in which case the logger classifies the SQL text, and may carry
/// a duration that was actually measured on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDescription {
    /// Query text
    pub sql: String,
    /// Bound values
    #[serde(default)]
    pub params: Vec<Value>,
    /// Pre-classified operation, if the producer knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    /// Measured duration in milliseconds (the backend reports it as `duration`)
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
}

impl QueryDescription {
    /// Create a description with no params.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Self::default()
        }
    }

    /// Attach bound params.
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }

    /// Pre-classify the operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Attach a measured duration.
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_serializes_uppercase() {
        let json = serde_json::to_string(&Operation::Select).unwrap();
        assert_eq!(json, "\"SELECT\"");

        let parsed: Operation = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(parsed, Operation::Delete);
    }

    #[test]
    fn test_operation_is_mutation() {
        assert!(!Operation::Select.is_mutation());
        assert!(Operation::Insert.is_mutation());
        assert!(Operation::Update.is_mutation());
        assert!(Operation::Delete.is_mutation());
        assert!(!Operation::Unknown.is_mutation());
    }

    #[test]
    fn test_log_ids_are_unique() {
        let a = LogId::new();
        let b = LogId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_params_pretty_empty() {
        let entry = QueryLogEntry {
            id: LogId::new(),
            sql: "SELECT * FROM students".into(),
            params: vec![],
            operation: Operation::Select,
            duration_ms: 1.5,
            timestamp: Utc::now(),
        };
        assert!(entry.params_pretty().is_none());
    }

    #[test]
    fn test_description_accepts_backend_shape() {
        // Server responses report `duration` and no operation.
        let json = r#"{"sql": "DELETE FROM students WHERE id = ?", "params": [3], "duration": 0.42}"#;
        let desc: QueryDescription = serde_json::from_str(json).unwrap();
        assert_eq!(desc.params, vec![Value::from(3)]);
        assert_eq!(desc.duration_ms, Some(0.42));
        assert!(desc.operation.is_none());
    }
}
