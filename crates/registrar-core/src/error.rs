//! Error types for Registrar

use thiserror::Error;

/// Main error type for Registrar operations
#[derive(Error, Debug)]
pub enum RegistrarError {
    /// Record was not found in its store
    #[error("{resource} not found: {key}")]
    NotFound {
        /// Table name of the resource (e.g. "students")
        resource: &'static str,
        /// Display form of the missing key
        key: String,
    },

    /// Record failed validation before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record conflicts with an existing one (duplicate key or unique field)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Key could not be parsed or assigned
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The wrapped record store failed for a reason of its own
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistrarError {
    /// Shorthand for a [`RegistrarError::NotFound`] on a resource table.
    pub fn not_found(resource: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    /// Whether this error means the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias using RegistrarError
pub type RegistrarResult<T> = Result<T, RegistrarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistrarError::not_found("students", 42);
        assert_eq!(format!("{}", err), "students not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RegistrarError = io_err.into();
        assert!(matches!(err, RegistrarError::Io(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: RegistrarError = json_err.into();
        assert!(matches!(err, RegistrarError::Serialization(_)));
    }
}
