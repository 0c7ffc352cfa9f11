//! Workbook creation and loading
//!
//! [`create`] is the sole creation path in the crate: the XML transform and
//! [`crate::session::WorkbookSession::create`] both go through it, so every
//! new file gets the same sanitation and the same atomic persist.

use crate::codec::Workbook;
use crate::error::{Result, SheetError};
use crate::sanitize;
use crate::types::Row;
use std::path::Path;

/// Create a new workbook file from a row matrix.
///
/// The workbook starts with one sheet, renamed to `initial_sheet_name` when
/// given. Non-empty `rows` are written cell by cell at their 1-based
/// (row, column) positions after ASCII sanitation. The file is always
/// persisted before returning.
///
/// # Errors
///
/// [`SheetError::AlreadyExists`] if `path` exists and `overwrite` is false.
///
/// # Examples
///
/// ```no_run
/// use sheetcast::{writer, Row};
///
/// # fn main() -> sheetcast::Result<()> {
/// let rows = vec![Row::from(["id", "name"]), Row::from(["1", "Alice"])];
/// writer::create("people.xlsx", &rows, Some("People"), false)?;
/// # Ok(())
/// # }
/// ```
pub fn create<P: AsRef<Path>>(
    path: P,
    rows: &[Row],
    initial_sheet_name: Option<&str>,
    overwrite: bool,
) -> Result<Workbook> {
    let path = path.as_ref();
    if !overwrite && path.exists() {
        return Err(SheetError::AlreadyExists(path.display().to_string()));
    }

    let mut workbook = Workbook::new();
    if let Some(name) = initial_sheet_name {
        workbook.rename_active(name);
    }

    if !rows.is_empty() {
        let sheet = workbook.active_sheet_mut();
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                sheet.set_cell(row_idx + 1, col_idx + 1, sanitize::sanitize(value));
            }
        }
    }

    workbook.save_to(path)?;
    Ok(workbook)
}

/// Load an existing workbook for full read/write access.
///
/// Existing content is taken as-is; sanitation applies only when cells are
/// rewritten.
///
/// # Errors
///
/// [`SheetError::NotFound`] if `path` does not exist.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    Workbook::load(path)
}
