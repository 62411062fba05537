//! Registrar Core Library
//!
//! Student and course record stores with an instrumented query log.
//!
//! ## Overview
//!
//! Registrar is a small administration console for students, departments,
//! faculty, courses and enrollments. Every read or write issued through a
//! store adapter is described as a representative SQL statement and deposited
//! into a bounded, in-session query log that a debugger panel mirrors live.
//!
//! ## Core Pieces
//!
//! - **Query log**: bounded, newest-first buffer with subscriber fan-out
//! - **Store adapters**: wrap a record store and log each completed call
//! - **Stores**: in-memory or redb-backed; the log itself is never persisted
//!
//! ## Quick Start
//!
//! ```ignore
//! use registrar_core::{Console, ConsoleConfig, StudentDraft};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let console = Console::in_memory(ConsoleConfig::default());
//!
//!     console
//!         .students()
//!         .create(StudentDraft {
//!             first_name: "Ada".into(),
//!             last_name: "Lovelace".into(),
//!             email: "ada@example.edu".into(),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     // INSERT INTO students (first_name, ...) VALUES (?, ...)
//!     for entry in console.logger().get_all() {
//!         println!("[{}] {}", entry.operation, entry.sql);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod console;
pub mod dashboard;
pub mod error;
pub mod panel;
pub mod query_log;
pub mod records;
pub mod store;

// Re-exports
pub use adapter::StoreAdapter;
pub use console::{
    Console, ConsoleConfig, CourseAdapter, DepartmentAdapter, EnrollmentAdapter, FacultyAdapter,
    StudentAdapter, DATABASE_FILE,
};
pub use dashboard::{ChartPoint, DashboardSummary, TOP_COURSES};
pub use error::{RegistrarError, RegistrarResult};
pub use panel::PanelState;
pub use query_log::{
    classify, DurationModel, LogId, Operation, QueryDescription, QueryLogConfig, QueryLogEntry,
    QueryLogStats, QueryLogger, Subscription,
};
pub use records::*;
pub use store::{Collaborator, MemoryStore, RecordStore, RedbStore};
