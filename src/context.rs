//! Console context for Registrar.
//!
//! Provides the Console instance and UI-wide signals to all components via
//! use_context.
//!
//! ## Usage
//!
//! ```ignore
//! // In child components
//! let console = use_console();
//! let students = console().students().fetch_all().await?;
//! ```

use std::sync::Arc;

use dioxus::prelude::*;
use registrar_core::Console;

/// Shared console type for context.
pub type SharedConsole = Arc<Console>;

/// Console passed as a component prop; equal when it is the same console.
#[derive(Clone)]
pub struct ConsoleHandle(pub SharedConsole);

impl PartialEq for ConsoleHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Bumped whenever the query log or the panel changes.
#[derive(Clone, Copy)]
pub struct LogRevision(pub Signal<u64>);

/// Bumped after a record mutation so pages refetch.
#[derive(Clone, Copy)]
pub struct DataRevision(pub Signal<u64>);

/// Last user-visible error, shown in the banner.
#[derive(Clone, Copy)]
pub struct ErrorBanner(pub Signal<Option<String>>);

/// Hook to access the Console from context.
pub fn use_console() -> Signal<SharedConsole> {
    use_context::<Signal<SharedConsole>>()
}

/// Hook returning the query log revision signal.
///
/// Reading it subscribes the component to log and panel changes.
pub fn use_log_revision() -> Signal<u64> {
    use_context::<LogRevision>().0
}

/// Hook returning the record data revision signal.
pub fn use_data_revision() -> Signal<u64> {
    use_context::<DataRevision>().0
}

/// Hook returning the error banner signal.
pub fn use_error_banner() -> Signal<Option<String>> {
    use_context::<ErrorBanner>().0
}

/// Record a mutation: refresh pages and clear any stale error.
pub fn mark_changed(mut data: Signal<u64>, mut error: Signal<Option<String>>) {
    *data.write() += 1;
    error.set(None);
}

/// Show an error in the banner.
pub fn report_error(mut error: Signal<Option<String>>, context: &str, err: impl std::fmt::Display) {
    tracing::warn!("{}: {}", context, err);
    error.set(Some(format!("{}: {}", context, err)));
}
