//! Color constants shared by inline styles.
//!
//! Kept in step with the custom properties in `styles.rs`.

use registrar_core::Operation;

// === OPERATIONS ===
pub const SELECT: &str = "#5f8fff";
pub const INSERT: &str = "#39c47a";
pub const UPDATE: &str = "#ff9f00";
pub const DELETE: &str = "#ff3366";
pub const UNKNOWN: &str = "rgba(245, 245, 245, 0.5)";

// === CHARTS ===
pub const CHART_BARS: [&str; 4] = ["#00d4aa", "#5f8fff", "#c4a7d7", "#d4af37"];

/// Badge color for an operation kind.
pub fn operation_color(operation: Operation) -> &'static str {
    match operation {
        Operation::Select => SELECT,
        Operation::Insert => INSERT,
        Operation::Update => UPDATE,
        Operation::Delete => DELETE,
        Operation::Unknown => UNKNOWN,
    }
}
