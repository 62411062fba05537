//! Operation classifier.
//!
//! Maps free-form query text to an [`Operation`] by looking at its leading
//! verb. Only a fixed-size prefix of the input is inspected, so a verb that
//! sits behind a long comment or a large run of whitespace is reported as
//! [`Operation::Unknown`].

use super::entry::Operation;

/// Number of leading bytes the classifier looks at.
pub const CLASSIFY_WINDOW: usize = 32;

/// Classify query text by its leading verb (case-insensitive).
pub fn classify(sql: &str) -> Operation {
    let window = prefix(sql, CLASSIFY_WINDOW);
    let token = window
        .trim_start()
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or("");

    if token.eq_ignore_ascii_case("SELECT") {
        Operation::Select
    } else if token.eq_ignore_ascii_case("INSERT") {
        Operation::Insert
    } else if token.eq_ignore_ascii_case("UPDATE") {
        Operation::Update
    } else if token.eq_ignore_ascii_case("DELETE") {
        Operation::Delete
    } else {
        Operation::Unknown
    }
}

/// Longest prefix of `s` no longer than `max` bytes, cut on a char boundary.
fn prefix(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_verbs() {
        assert_eq!(classify("SELECT * FROM x"), Operation::Select);
        assert_eq!(classify("INSERT INTO x VALUES (?)"), Operation::Insert);
        assert_eq!(classify("UPDATE x SET a = ?"), Operation::Update);
        assert_eq!(classify("DELETE FROM x WHERE id = ?"), Operation::Delete);
    }

    #[test]
    fn test_classify_is_case_and_whitespace_insensitive() {
        assert_eq!(classify("  insert into x"), Operation::Insert);
        assert_eq!(classify("\n\tSeLeCt 1"), Operation::Select);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("garbage"), Operation::Unknown);
        assert_eq!(classify(""), Operation::Unknown);
        assert_eq!(classify("   "), Operation::Unknown);
        assert_eq!(classify("SELECTED things"), Operation::Unknown);
        assert_eq!(classify("PRAGMA foreign_keys = ON"), Operation::Unknown);
    }

    #[test]
    fn test_classify_token_ends_at_punctuation() {
        assert_eq!(classify("select*from x"), Operation::Select);
        assert_eq!(classify("delete;"), Operation::Delete);
    }

    #[test]
    fn test_classify_only_reads_the_window() {
        let padded = format!("{}SELECT * FROM x", " ".repeat(CLASSIFY_WINDOW));
        assert_eq!(classify(&padded), Operation::Unknown);

        let comment = "/* a comment that is long enough to push the verb out */ SELECT 1";
        assert_eq!(classify(comment), Operation::Unknown);
    }

    #[test]
    fn test_classify_multibyte_input() {
        let s = "é".repeat(40);
        assert_eq!(classify(&s), Operation::Unknown);
    }
}
