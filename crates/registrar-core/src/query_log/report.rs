//! Text and JSONL renderings of query log entries.
//!
//! Used by the CLI to print a session's queries after a command runs.

use std::fmt::Write;

use super::entry::QueryLogEntry;
use super::logger::QueryLogStats;

/// Render entries as a human-readable listing, in the order given.
///
/// ```text
/// [INSERT] 14:03:22.120  3.42ms
///   INSERT INTO departments (name, head) VALUES (?, ?)
///   params: ["Physics", null]
/// ```
pub fn render_text(entries: &[QueryLogEntry]) -> String {
    if entries.is_empty() {
        return "No queries executed yet.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "[{}] {}  {:.2}ms",
            entry.operation,
            entry.time_of_day(),
            entry.duration_ms
        );
        let _ = writeln!(out, "  {}", entry.sql);
        if !entry.params.is_empty() {
            let params = serde_json::to_string(&entry.params).unwrap_or_default();
            let _ = writeln!(out, "  params: {}", params);
        }
    }
    out
}

/// Render a one-line summary per operation kind.
pub fn render_stats(stats: &QueryLogStats) -> String {
    let mut out = String::new();
    let _ = write!(out, "{} queries", stats.total);
    for (operation, count) in &stats.by_operation {
        let _ = write!(out, ", {} {}", count, operation);
    }
    if stats.total > 0 {
        let _ = write!(out, " (mean {:.2}ms)", stats.mean_duration_ms);
    }
    out
}

/// Serialize entries as JSON Lines (one object per line, no trailing newline).
pub fn to_json_lines(entries: &[QueryLogEntry]) -> Result<String, serde_json::Error> {
    let lines = entries
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
