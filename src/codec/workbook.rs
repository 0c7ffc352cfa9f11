//! In-memory workbook document model
//!
//! Holds the full cell grid of every sheet. Decoding goes through calamine,
//! encoding through [`super::encode`]. Values only: styles, formulas and
//! merged cells are out of scope for this crate.

use crate::error::{Result, SheetError};
use crate::reader::cell_to_string;
use crate::types::Row;
use calamine::{open_workbook_auto, Reader};
use std::path::Path;

/// Default title for the sheet a fresh workbook starts with
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// One sheet of the in-memory workbook
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    rows: Vec<Row>,
    generation: u64,
}

impl Worksheet {
    fn new(name: String, generation: u64) -> Self {
        Worksheet {
            name,
            rows: Vec::new(),
            generation,
        }
    }

    /// Sheet title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full row matrix, in row order
    pub fn row_matrix(&self) -> &[Row] {
        &self.rows
    }

    /// Bumped every time a `clear` replaces this sheet; handles compare
    /// against it to detect staleness.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Highest populated 1-based row index (0 for an empty sheet).
    ///
    /// Reflects the last row ever written, not a count of non-empty rows.
    pub fn max_row(&self) -> usize {
        self.rows.len()
    }

    /// Append a row after the current last row
    pub fn append_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Write one cell at a 1-based (row, column) position, growing the grid
    /// with empty cells as needed. Cells outside the target are untouched.
    pub fn set_cell(&mut self, row: usize, col: usize, value: String) {
        debug_assert!(row >= 1 && col >= 1, "cell coordinates are 1-based");
        while self.rows.len() < row {
            self.rows.push(Row::new());
        }
        let target = &mut self.rows[row - 1];
        target.pad_to(col);
        *target.cell_mut(col - 1) = value;
    }
}

/// An in-memory workbook bound to no file until saved.
///
/// A freshly created workbook always has exactly one default sheet.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
    active: usize,
}

impl Workbook {
    /// New workbook with a single empty default sheet
    pub fn new() -> Self {
        Workbook {
            sheets: vec![Worksheet::new(DEFAULT_SHEET_NAME.to_string(), 0)],
            active: 0,
        }
    }

    /// Decode the workbook at `path` into the in-memory model.
    ///
    /// Leading empty rows and columns are preserved so 1-based cell
    /// coordinates survive a load/save round trip.
    ///
    /// # Errors
    ///
    /// [`SheetError::NotFound`] if `path` does not exist;
    /// [`SheetError::Codec`] if the file decodes to zero sheets.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SheetError::NotFound(path.display().to_string()));
        }

        let mut decoder = open_workbook_auto(path)?;
        let mut sheets = Vec::new();

        for name in decoder.sheet_names().to_vec() {
            let range = decoder.worksheet_range(&name)?;
            let mut sheet = Worksheet::new(name, 0);

            let (start_row, start_col) = range.start().unwrap_or((0, 0));
            for _ in 0..start_row {
                sheet.rows.push(Row::new());
            }
            for row in range.rows() {
                let mut cells = Row::new();
                cells.pad_to(start_col as usize);
                for data in row {
                    cells.push(cell_to_string(data));
                }
                sheet.rows.push(cells);
            }

            sheets.push(sheet);
        }

        if sheets.is_empty() {
            return Err(SheetError::Codec(format!(
                "workbook has no sheets: {}",
                path.display()
            )));
        }
        Ok(Workbook { sheets, active: 0 })
    }

    /// Encode and persist the workbook, atomically replacing `path`
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        super::encode::write_workbook(self, path.as_ref())
    }

    pub(crate) fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    /// Sheet titles in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// The currently active sheet
    pub fn active_sheet(&self) -> &Worksheet {
        &self.sheets[self.active]
    }

    /// The currently active sheet, for mutation
    pub fn active_sheet_mut(&mut self) -> &mut Worksheet {
        &mut self.sheets[self.active]
    }

    /// Look up a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Look up a sheet by name for mutation
    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    /// Rename the active sheet
    pub fn rename_active(&mut self, name: &str) {
        self.sheets[self.active].name = name.to_string();
    }

    /// Create a new empty sheet appended after the existing ones.
    ///
    /// No uniqueness check is performed; a duplicate name shadows the earlier
    /// sheet for name-based lookups.
    pub fn create_sheet(&mut self, name: &str) -> &mut Worksheet {
        self.sheets.push(Worksheet::new(name.to_string(), 0));
        self.sheets.last_mut().unwrap()
    }

    /// Replace the named sheet with an empty one of the same name at the same
    /// position, bumping its generation so outstanding handles go stale.
    pub fn reset_sheet(&mut self, name: &str) -> Option<&Worksheet> {
        let idx = self.sheets.iter().position(|s| s.name() == name)?;
        let next_generation = self.sheets[idx].generation + 1;
        self.sheets[idx] = Worksheet::new(name.to_string(), next_generation);
        Some(&self.sheets[idx])
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_workbook_has_default_sheet() {
        let workbook = Workbook::new();
        assert_eq!(workbook.sheet_names(), vec![DEFAULT_SHEET_NAME]);
        assert_eq!(workbook.active_sheet().max_row(), 0);
    }

    #[test]
    fn test_set_cell_grows_grid() {
        let mut workbook = Workbook::new();
        let sheet = workbook.sheet_mut(DEFAULT_SHEET_NAME).unwrap();

        sheet.set_cell(2, 3, "x".to_string());
        assert_eq!(sheet.max_row(), 2);
        assert_eq!(sheet.row_matrix()[0], Row::new());
        assert_eq!(sheet.row_matrix()[1].cells(), &["", "", "x"]);

        // Writing inside the grid leaves neighbors alone
        sheet.set_cell(2, 1, "y".to_string());
        assert_eq!(sheet.row_matrix()[1].cells(), &["y", "", "x"]);
    }

    #[test]
    fn test_reset_sheet_keeps_position_and_bumps_generation() {
        let mut workbook = Workbook::new();
        workbook.create_sheet("Data");
        workbook
            .sheet_mut("Data")
            .unwrap()
            .append_row(Row::from(["a"]));

        let before = workbook.sheet("Data").unwrap().generation();
        workbook.reset_sheet("Data").unwrap();

        let sheet = workbook.sheet("Data").unwrap();
        assert_eq!(sheet.max_row(), 0);
        assert_eq!(sheet.generation(), before + 1);
        assert_eq!(workbook.sheet_names(), vec![DEFAULT_SHEET_NAME, "Data"]);
    }

    #[test]
    fn test_reset_missing_sheet() {
        let mut workbook = Workbook::new();
        assert!(workbook.reset_sheet("Nope").is_none());
    }

    #[test]
    fn test_load_rejects_workbook_without_sheets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hollow.xlsx");
        let hollow = Workbook {
            sheets: Vec::new(),
            active: 0,
        };
        hollow.save_to(&path).unwrap();

        let err = Workbook::load(&path).unwrap_err();
        assert!(matches!(err, SheetError::Codec(_)));
    }
}
