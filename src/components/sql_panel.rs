//! SQL Debugger Panel Component
//!
//! Side panel listing the queries issued by the console, newest first.
//! Each row shows the operation badge, time of day, duration, query text
//! and bound params.

use dioxus::prelude::*;
use registrar_core::{Operation, QueryLogEntry};

use crate::context::{use_console, use_log_revision};
use crate::theme::colors;

/// Coloured badge for an operation kind.
#[component]
pub fn OperationBadge(operation: Operation) -> Element {
    let color = colors::operation_color(operation);

    rsx! {
        span {
            class: "op-badge",
            style: "color: {color}; border-color: {color};",
            "{operation}"
        }
    }
}

/// One logged query.
#[component]
fn SqlLogRow(entry: QueryLogEntry) -> Element {
    let params = entry.params_pretty();
    let duration = format!("{:.2}ms", entry.duration_ms);

    rsx! {
        div { class: "sql-row",
            div { class: "sql-row-meta",
                OperationBadge { operation: entry.operation }
                span { class: "sql-time", "{entry.time_of_day()}" }
                span { class: "sql-duration", "{duration}" }
            }
            pre { class: "sql-text", "{entry.sql}" }
            if let Some(params) = params {
                pre { class: "sql-params", "{params}" }
            }
        }
    }
}

/// SQL Debugger panel.
///
/// Renders nothing while the panel is closed. Re-renders on every new log
/// entry via the log revision signal.
#[component]
pub fn SqlDebuggerPanel() -> Element {
    let console = use_console();
    let mut log_revision = use_log_revision();

    let _ = log_revision();
    let (is_open, logs) = {
        let console = console.read();
        (console.panel().is_open(), console.panel().logs())
    };

    if !is_open {
        return rsx! {};
    }

    let clear_logs = move |_| {
        console.read().panel().clear();
        *log_revision.write() += 1;
    };

    let close = move |_| {
        console.read().panel().set_open(false);
        *log_revision.write() += 1;
    };

    let count = logs.len();

    rsx! {
        aside { class: "sql-panel",
            div { class: "sql-panel-header",
                h2 { class: "sql-panel-title", "SQL Debugger" }
                span { class: "sql-panel-count", "{count} queries" }
                button { class: "btn btn-small", onclick: clear_logs, "Clear Logs" }
                button { class: "btn btn-icon", title: "Close", onclick: close, "\u{2715}" }
            }

            div { class: "sql-panel-entries",
                if logs.is_empty() {
                    div { class: "sql-panel-empty", "No queries executed yet" }
                } else {
                    for entry in logs {
                        SqlLogRow { key: "{entry.id}", entry }
                    }
                }
            }
        }
    }
}
