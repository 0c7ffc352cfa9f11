//! Core tabular value types shared by every transform

use indexmap::IndexMap;
use serde::Serialize;
use std::ops::Index;

/// A single row of string cells.
///
/// Rows within one sheet are not required to have equal length; consumers that
/// need fixed-width rows (e.g. the JSON conversion) pad short rows explicitly
/// with [`Row::pad_to`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row(Vec<String>);

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Row(Vec::new())
    }

    /// Access the cells as a slice
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    /// Get the cell at `col`, if populated
    pub fn get(&self, col: usize) -> Option<&str> {
        self.0.get(col).map(String::as_str)
    }

    /// Append a cell
    pub fn push(&mut self, cell: String) {
        self.0.push(cell);
    }

    /// Number of cells in this row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Right-pad with empty strings until the row holds `width` cells.
    ///
    /// Rows already at least `width` cells wide are left untouched.
    pub fn pad_to(&mut self, width: usize) {
        while self.0.len() < width {
            self.0.push(String::new());
        }
    }

    /// Iterate over the cells
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Mutable access to one cell; the index must already be populated
    pub(crate) fn cell_mut(&mut self, col: usize) -> &mut String {
        &mut self.0[col]
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Row(cells)
    }
}

impl<const N: usize> From<[&str; N]> for Row {
    fn from(cells: [&str; N]) -> Self {
        Row(cells.iter().map(|s| s.to_string()).collect())
    }
}

impl FromIterator<String> for Row {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Row(iter.into_iter().collect())
    }
}

impl Index<usize> for Row {
    type Output = String;

    fn index(&self, col: usize) -> &String {
        &self.0[col]
    }
}

impl IntoIterator for Row {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// In-memory mapping from sheet name to its row matrix.
///
/// The common interchange value between all transforms. Keys are unique and
/// iteration order follows source sheet order. Instances are transient:
/// produced by a reader or transform, consumed by the next stage, never
/// persisted directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TabularModel {
    sheets: IndexMap<String, Vec<Row>>,
}

impl TabularModel {
    /// Create an empty model
    pub fn new() -> Self {
        TabularModel {
            sheets: IndexMap::new(),
        }
    }

    /// Insert a sheet, replacing any previous sheet of the same name
    pub fn insert_sheet(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.sheets.insert(name.into(), rows);
    }

    /// Look up a sheet's rows by name
    pub fn sheet(&self, name: &str) -> Option<&[Row]> {
        self.sheets.get(name).map(Vec::as_slice)
    }

    /// Sheet names in source order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Number of sheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check whether the model holds no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Iterate over `(sheet name, rows)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Row])> {
        self.sheets
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }
}

/// One JSON record: an ordered mapping from header name to cell value
pub type Record = IndexMap<String, String>;

/// JSON conversion result: sheet name to its record sequence, in sheet order
pub type SheetRecords = IndexMap<String, Vec<Record>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_pad_to() {
        let mut row = Row::from(["a"]);
        row.pad_to(3);
        assert_eq!(row.cells(), &["a", "", ""]);

        // Already wide enough: untouched
        let mut row = Row::from(["a", "b", "c"]);
        row.pad_to(2);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_model_preserves_sheet_order() {
        let mut model = TabularModel::new();
        model.insert_sheet("Zeta", vec![]);
        model.insert_sheet("Alpha", vec![]);
        model.insert_sheet("Mid", vec![]);

        assert_eq!(model.sheet_names(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_model_lookup() {
        let mut model = TabularModel::new();
        model.insert_sheet("Data", vec![Row::from(["x", "y"])]);

        assert!(model.sheet("Data").is_some());
        assert!(model.sheet("Missing").is_none());
        assert_eq!(model.sheet("Data").unwrap()[0].get(1), Some("y"));
    }
}
