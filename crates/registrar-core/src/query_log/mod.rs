//! Query log: the "SQL debugger" instrumentation layer.
//!
//! Every store adapter call that completes deposits one [`QueryLogEntry`]
//! into a shared [`QueryLogger`]. The logger keeps the most recent entries
//! (100 by default), newest first, and fans each new entry out to
//! subscribers such as the debugger panel.
//!
//! ## Usage
//!
//! ```ignore
//! use registrar_core::query_log::{classify, Operation, QueryLogger};
//!
//! let logger = QueryLogger::with_defaults();
//! let _sub = logger.subscribe(|entry| tracing::debug!(sql = %entry.sql, "query"));
//!
//! logger.append(classify("SELECT * FROM students"), "SELECT * FROM students", vec![]);
//! ```

pub mod classify;
pub mod entry;
pub mod logger;
pub mod report;

pub use classify::{classify, CLASSIFY_WINDOW};
pub use entry::{LogId, Operation, QueryDescription, QueryLogEntry};
pub use logger::{
    DurationModel, QueryLogConfig, QueryLogStats, QueryLogger, Subscription, DEFAULT_CAPACITY,
};
pub use report::{render_stats, render_text, to_json_lines};
