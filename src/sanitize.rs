//! ASCII sanitation for values headed into the workbook codec
//!
//! The legacy workbook codec rejects control and extended characters, so every
//! value written through [`crate::writer::create`] or a
//! [`crate::session::SheetHandle`] mutator passes through this filter first.
//! Characters at or above code point 128 are dropped, not replaced or escaped.
//! Callers that need full Unicode must pre-encode before writing.

use crate::types::Row;

/// Strip every character with code point >= 128 from `value`.
///
/// The relative order of the retained characters is preserved.
///
/// # Examples
///
/// ```
/// assert_eq!(sheetcast::sanitize::sanitize("héllo"), "hllo");
/// assert_eq!(sheetcast::sanitize::sanitize("plain"), "plain");
/// ```
pub fn sanitize(value: &str) -> String {
    value.chars().filter(char::is_ascii).collect()
}

/// Apply [`sanitize`] to every cell of a row
pub fn sanitize_row(row: &Row) -> Row {
    row.iter().map(|cell| sanitize(cell)).collect()
}

/// Apply [`sanitize`] to every cell of every row
pub fn sanitize_rows(rows: &[Row]) -> Vec<Row> {
    rows.iter().map(sanitize_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_non_ascii() {
        assert_eq!(sanitize("héllo"), "hllo");
        assert_eq!(sanitize("Ñoño"), "oo");
        assert_eq!(sanitize("€100"), "100");
    }

    #[test]
    fn test_ascii_unchanged() {
        let input = "plain ASCII, digits 123 and <symbols>!";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize("naïve café ☕");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_only_ascii_remains() {
        let out = sanitize("ab😀c∑d");
        assert!(out.chars().all(|c| (c as u32) < 128));
        assert_eq!(out, "abcd");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_rows_elementwise() {
        let rows = vec![Row::from(["héllo", "wörld"]), Row::from(["ok"])];
        let clean = sanitize_rows(&rows);
        assert_eq!(clean[0].cells(), &["hllo", "wrld"]);
        assert_eq!(clean[1].cells(), &["ok"]);
    }
}
