//! Minimal XML assembly for the workbook encoder

use std::collections::HashMap;

/// Append `text` to `out` with the five XML metacharacters escaped
pub(crate) fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

/// Convert a 1-based column number to its letter form (1 -> A, 27 -> AA)
pub(crate) fn col_to_letter(col: u32) -> String {
    let mut out = String::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        out.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    out
}

/// Shared strings table deduplicating cell text across the workbook
#[derive(Default)]
pub(crate) struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, u32>,
    references: usize,
}

impl SharedStrings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Intern a string and return its table index
    pub(crate) fn intern(&mut self, s: &str) -> u32 {
        self.references += 1;
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }
        let idx = self.strings.len() as u32;
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), idx);
        idx
    }

    pub(crate) fn count(&self) -> usize {
        self.strings.len()
    }

    /// Render the sharedStrings.xml part.
    ///
    /// `count` is the total number of cell references into the table,
    /// `uniqueCount` the number of distinct strings.
    pub(crate) fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.strings.len() * 24);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str(&format!(
            "<sst xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
             count=\"{}\" uniqueCount=\"{}\">",
            self.references,
            self.count()
        ));
        for s in &self.strings {
            // xml:space preserves leading/trailing whitespace in cell text
            xml.push_str("<si><t xml:space=\"preserve\">");
            push_escaped(&mut xml, s);
            xml.push_str("</t></si>");
        }
        xml.push_str("</sst>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(1), "A");
        assert_eq!(col_to_letter(26), "Z");
        assert_eq!(col_to_letter(27), "AA");
        assert_eq!(col_to_letter(52), "AZ");
        assert_eq!(col_to_letter(703), "AAA");
    }

    #[test]
    fn test_escaping() {
        let mut out = String::new();
        push_escaped(&mut out, "<a & \"b\">");
        assert_eq!(out, "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_shared_strings_dedup() {
        let mut table = SharedStrings::new();
        assert_eq!(table.intern("Hello"), 0);
        assert_eq!(table.intern("World"), 1);
        assert_eq!(table.intern("Hello"), 0);
        assert_eq!(table.count(), 2);
    }

    #[test]
    fn test_shared_strings_xml() {
        let mut table = SharedStrings::new();
        table.intern("a<b");
        table.intern("a<b");
        let xml = table.to_xml();
        // count tallies references, uniqueCount the distinct strings
        assert!(xml.contains("count=\"2\""));
        assert!(xml.contains("uniqueCount=\"1\""));
        assert!(xml.contains("a&lt;b"));
    }
}
