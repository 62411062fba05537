//! Property-based tests for the query log
//!
//! Uses proptest to check the buffer and classifier invariants for arbitrary
//! append sequences and inputs.

use proptest::prelude::*;
use registrar_core::query_log::{classify, CLASSIFY_WINDOW};
use registrar_core::{DurationModel, Operation, QueryLogConfig, QueryLogger};

// ============================================================================
// Strategy Generators
// ============================================================================

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

/// Leading verb in random case
fn verb_strategy() -> impl Strategy<Value = (Operation, String)> {
    (
        prop::sample::select(vec![
            (Operation::Select, "select"),
            (Operation::Insert, "insert"),
            (Operation::Update, "update"),
            (Operation::Delete, "delete"),
        ]),
        prop::collection::vec(any::<bool>(), 6),
    )
        .prop_map(|((op, verb), upper)| {
            let cased = verb
                .chars()
                .zip(upper)
                .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
                .collect();
            (op, cased)
        })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// The buffer never exceeds capacity and keeps the newest entries first
    #[test]
    fn buffer_keeps_newest_within_capacity(
        capacity in 1usize..40,
        ops in prop::collection::vec(operation_strategy(), 0..120),
    ) {
        let logger = QueryLogger::new(
            QueryLogConfig::default()
                .with_capacity(capacity)
                .with_duration(DurationModel::Fixed(1.0)),
        );

        for (i, op) in ops.iter().enumerate() {
            logger.append(*op, format!("Q{}", i), vec![]);
        }

        let entries = logger.get_all();
        prop_assert_eq!(entries.len(), ops.len().min(capacity));

        let expected: Vec<String> = (0..ops.len())
            .rev()
            .take(capacity)
            .map(|i| format!("Q{}", i))
            .collect();
        let actual: Vec<String> = entries.iter().map(|e| e.sql.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Timestamps never decrease from oldest to newest
    #[test]
    fn timestamps_are_monotonic(count in 1usize..60) {
        let logger = QueryLogger::with_defaults();
        for i in 0..count {
            logger.append(Operation::Select, format!("SELECT {}", i), vec![]);
        }

        let entries = logger.get_all();
        for pair in entries.windows(2) {
            prop_assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    /// Simulated durations stay in range with two decimals
    #[test]
    fn simulated_durations_in_range(count in 1usize..50) {
        let logger = QueryLogger::with_defaults();
        for _ in 0..count {
            let entry = logger.append(Operation::Select, "SELECT 1", vec![]);
            prop_assert!(entry.duration_ms >= 1.0 && entry.duration_ms <= 11.0);
            let scaled = entry.duration_ms * 100.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    /// A recognised verb is classified regardless of case and leading spaces
    #[test]
    fn classify_recognises_verbs(
        (op, verb) in verb_strategy(),
        padding in 0usize..8,
        rest in "[ (*;][a-z ]{0,40}",
    ) {
        let sql = format!("{}{}{}", " ".repeat(padding), verb, rest);
        prop_assert_eq!(classify(&sql), op);
    }

    /// Classification never panics and ignores everything past the window
    #[test]
    fn classify_only_reads_prefix(s in any::<String>(), tail in any::<String>()) {
        let window_end = s
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .take_while(|end| *end <= CLASSIFY_WINDOW)
            .last()
            .unwrap_or(0);
        let head = &s[..window_end];
        let extended = format!("{}{}", s, tail);

        if s.len() >= CLASSIFY_WINDOW {
            prop_assert_eq!(classify(&extended), classify(head));
        } else {
            let _ = classify(&extended);
        }
    }
}
