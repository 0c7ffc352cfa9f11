//! Live editing sessions over a workbook file
//!
//! A [`WorkbookSession`] binds one in-memory [`Workbook`] to a file path.
//! Every mutating operation on a [`SheetHandle`] persists the whole workbook
//! before returning, so the file on disk never trails the in-memory state.
//! Saves are atomic (temp file + rename), so an interrupted save leaves the
//! previous file intact.
//!
//! The design assumes a single-threaded caller. Multiple handles over one
//! session are fine; multiple sessions bound to the same file are not
//! coordinated and the last writer wins.

use crate::codec::Workbook;
use crate::error::{Result, SheetError};
use crate::paths;
use crate::sanitize;
use crate::types::Row;
use crate::writer;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// An open, mutable workbook bound to a file path.
///
/// # Examples
///
/// ```no_run
/// use sheetcast::{Row, WorkbookSession};
///
/// # fn main() -> sheetcast::Result<()> {
/// let session = WorkbookSession::create("log.xlsx", Some("Entries"), false)?;
/// let sheet = session.sheet(None)?;
/// sheet.append(&[Row::from(["2024-01-15", "started"])])?;
/// assert_eq!(sheet.row_count()?, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WorkbookSession {
    path: PathBuf,
    workbook: RefCell<Workbook>,
}

impl WorkbookSession {
    /// Create a new workbook file and bind a session to it.
    ///
    /// # Errors
    ///
    /// [`SheetError::InvalidFormat`] for a non-workbook extension;
    /// [`SheetError::AlreadyExists`] if the file exists and `overwrite` is
    /// false.
    pub fn create<P: AsRef<Path>>(
        path: P,
        initial_sheet_name: Option<&str>,
        overwrite: bool,
    ) -> Result<Self> {
        let path = path.as_ref();
        paths::require_workbook_extension(path)?;
        let workbook = writer::create(path, &[], initial_sheet_name, overwrite)?;
        Ok(WorkbookSession {
            path: path.to_path_buf(),
            workbook: RefCell::new(workbook),
        })
    }

    /// Bind a session to an existing workbook file.
    ///
    /// # Errors
    ///
    /// [`SheetError::InvalidFormat`] for a non-workbook extension;
    /// [`SheetError::NotFound`] if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        paths::require_workbook_extension(path)?;
        if !path.exists() {
            return Err(SheetError::NotFound(path.display().to_string()));
        }
        let workbook = writer::open(path)?;
        Ok(WorkbookSession {
            path: path.to_path_buf(),
            workbook: RefCell::new(workbook),
        })
    }

    /// The file path this session is bound to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet titles in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook
            .borrow()
            .sheet_names()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Get a handle to the named sheet, or to the active sheet when `name`
    /// is absent.
    ///
    /// # Errors
    ///
    /// [`SheetError::SheetNotFound`] when the name does not exist.
    pub fn sheet(&self, name: Option<&str>) -> Result<SheetHandle<'_>> {
        let workbook = self.workbook.borrow();
        let sheet = match name {
            Some(n) => workbook.sheet(n).ok_or_else(|| SheetError::SheetNotFound {
                sheet: n.to_string(),
                available: workbook.sheet_names().join(", "),
            })?,
            None => workbook.active_sheet(),
        };
        Ok(SheetHandle {
            session: self,
            name: sheet.name().to_string(),
            generation: sheet.generation(),
        })
    }

    /// Create a new empty sheet, persist, and return a handle to it.
    ///
    /// Names are not checked for uniqueness; a duplicate shadows the earlier
    /// sheet for name-based lookups.
    pub fn new_sheet(&self, name: &str) -> Result<SheetHandle<'_>> {
        let generation = {
            let mut workbook = self.workbook.borrow_mut();
            workbook.create_sheet(name).generation()
        };
        self.save()?;
        Ok(SheetHandle {
            session: self,
            name: name.to_string(),
            generation,
        })
    }

    /// Persist the entire in-memory workbook to the bound path.
    ///
    /// Called internally by every mutating handle operation; idempotent.
    pub fn save(&self) -> Result<()> {
        self.workbook.borrow().save_to(&self.path)
    }
}

/// A live view of one sheet inside a [`WorkbookSession`].
///
/// Handles are validated on every operation: a handle taken out before
/// another handle `clear`ed the same sheet fails with
/// [`SheetError::StaleHandle`] instead of silently operating on a detached
/// sheet.
#[derive(Debug)]
pub struct SheetHandle<'a> {
    session: &'a WorkbookSession,
    name: String,
    generation: u64,
}

impl SheetHandle<'_> {
    /// The sheet title this handle is bound to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sanitize `rows` and append them after the sheet's current last row,
    /// then persist the session.
    pub fn append(&self, rows: &[Row]) -> Result<()> {
        {
            let mut workbook = self.session.workbook.borrow_mut();
            let sheet = self.live_sheet(&mut workbook)?;
            for row in sanitize::sanitize_rows(rows) {
                sheet.append_row(row);
            }
        }
        self.session.save()
    }

    /// Sanitize and write each cell of `rows` starting at 1-based row
    /// `row_start + 1`, column 1, then persist. Cells outside the written
    /// range are untouched.
    pub fn overwrite(&self, rows: &[Row], row_start: usize) -> Result<()> {
        {
            let mut workbook = self.session.workbook.borrow_mut();
            let sheet = self.live_sheet(&mut workbook)?;
            for (row_idx, row) in rows.iter().enumerate() {
                for (col_idx, value) in row.iter().enumerate() {
                    sheet.set_cell(
                        row_idx + row_start + 1,
                        col_idx + 1,
                        sanitize::sanitize(value),
                    );
                }
            }
        }
        self.session.save()
    }

    /// Discard all rows, replacing the sheet with an empty one of the same
    /// name at the same position, then persist.
    ///
    /// This handle follows the replacement and stays usable; any other handle
    /// on the same sheet goes stale.
    pub fn clear(&mut self) -> Result<()> {
        {
            let mut workbook = self.session.workbook.borrow_mut();
            // Validate before replacing so a stale handle cannot clear twice
            self.live_sheet(&mut workbook)?;
            let replacement = workbook
                .reset_sheet(&self.name)
                .expect("sheet validated above");
            self.generation = replacement.generation();
        }
        self.session.save()
    }

    /// The current sheet contents, in row order, from the live in-memory
    /// state
    pub fn rows(&self) -> Result<Vec<Row>> {
        let mut workbook = self.session.workbook.borrow_mut();
        let sheet = self.live_sheet(&mut workbook)?;
        Ok(sheet.row_matrix().to_vec())
    }

    /// Highest populated 1-based row index.
    ///
    /// Reflects the last-written row, not a count of non-empty rows.
    pub fn row_count(&self) -> Result<usize> {
        let mut workbook = self.session.workbook.borrow_mut();
        let sheet = self.live_sheet(&mut workbook)?;
        Ok(sheet.max_row())
    }

    /// Resolve this handle against the live workbook, failing fast when the
    /// sheet is gone or was replaced by another handle's `clear`.
    fn live_sheet<'w>(&self, workbook: &'w mut Workbook) -> Result<&'w mut crate::codec::Worksheet> {
        let available = workbook.sheet_names().join(", ");
        let sheet = workbook
            .sheet_mut(&self.name)
            .ok_or_else(|| SheetError::SheetNotFound {
                sheet: self.name.clone(),
                available,
            })?;
        if sheet.generation() != self.generation {
            return Err(SheetError::StaleHandle(self.name.clone()));
        }
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_rejects_bad_extension() {
        let err = WorkbookSession::create("book.txt", None, false).unwrap_err();
        assert!(matches!(err, SheetError::InvalidFormat(_)));
    }

    #[test]
    fn test_open_requires_existing_file() {
        let dir = tempdir().unwrap();
        let err = WorkbookSession::open(dir.path().join("gone.xlsx")).unwrap_err();
        assert!(matches!(err, SheetError::NotFound(_)));
    }

    #[test]
    fn test_append_then_rows() {
        let dir = tempdir().unwrap();
        let session =
            WorkbookSession::create(dir.path().join("a.xlsx"), None, false).unwrap();
        let sheet = session.sheet(None).unwrap();

        sheet.append(&[Row::from(["x", "y"])]).unwrap();
        assert_eq!(sheet.rows().unwrap(), vec![Row::from(["x", "y"])]);

        sheet.append(&[Row::from(["z"])]).unwrap();
        assert_eq!(
            sheet.rows().unwrap(),
            vec![Row::from(["x", "y"]), Row::from(["z"])]
        );
        assert_eq!(sheet.row_count().unwrap(), 2);
    }

    #[test]
    fn test_mutations_persist_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("persist.xlsx");
        {
            let session = WorkbookSession::create(&path, Some("Log"), false).unwrap();
            let sheet = session.sheet(Some("Log")).unwrap();
            sheet.append(&[Row::from(["entry"])]).unwrap();
        }

        // Reopen from disk: the append must have been flushed
        let session = WorkbookSession::open(&path).unwrap();
        let sheet = session.sheet(Some("Log")).unwrap();
        assert_eq!(sheet.rows().unwrap(), vec![Row::from(["entry"])]);
    }

    #[test]
    fn test_overwrite_touches_only_target_cells() {
        let dir = tempdir().unwrap();
        let session =
            WorkbookSession::create(dir.path().join("o.xlsx"), None, false).unwrap();
        let sheet = session.sheet(None).unwrap();
        sheet
            .append(&[Row::from(["a", "b"]), Row::from(["c", "d"])])
            .unwrap();

        sheet.overwrite(&[Row::from(["A"])], 1).unwrap();
        assert_eq!(
            sheet.rows().unwrap(),
            vec![Row::from(["a", "b"]), Row::from(["A", "d"])]
        );
    }

    #[test]
    fn test_clear_discards_rows_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.xlsx");
        let session = WorkbookSession::create(&path, None, false).unwrap();
        let mut sheet = session.sheet(None).unwrap();
        sheet.append(&[Row::from(["gone"])]).unwrap();

        sheet.clear().unwrap();
        assert_eq!(sheet.row_count().unwrap(), 0);

        // The clearing handle stays usable
        sheet.append(&[Row::from(["fresh"])]).unwrap();
        assert_eq!(sheet.rows().unwrap(), vec![Row::from(["fresh"])]);

        // And the clear survived the trip to disk
        let reopened = WorkbookSession::open(&path).unwrap();
        let sheet = reopened.sheet(None).unwrap();
        assert_eq!(sheet.rows().unwrap(), vec![Row::from(["fresh"])]);
    }

    #[test]
    fn test_clear_invalidates_other_handles() {
        let dir = tempdir().unwrap();
        let session =
            WorkbookSession::create(dir.path().join("s.xlsx"), None, false).unwrap();
        let stale = session.sheet(None).unwrap();
        let mut clearing = session.sheet(None).unwrap();

        stale.append(&[Row::from(["data"])]).unwrap();
        clearing.clear().unwrap();

        let err = stale.append(&[Row::from(["late"])]).unwrap_err();
        assert!(matches!(err, SheetError::StaleHandle(_)));
        let err = stale.rows().unwrap_err();
        assert!(matches!(err, SheetError::StaleHandle(_)));
    }

    #[test]
    fn test_sheet_lookup() {
        let dir = tempdir().unwrap();
        let session =
            WorkbookSession::create(dir.path().join("l.xlsx"), Some("Main"), false).unwrap();

        assert_eq!(session.sheet(None).unwrap().name(), "Main");
        assert!(session.sheet(Some("Main")).is_ok());

        let err = session.sheet(Some("Nope")).unwrap_err();
        match err {
            SheetError::SheetNotFound { sheet, available } => {
                assert_eq!(sheet, "Nope");
                assert!(available.contains("Main"));
            }
            other => panic!("expected SheetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_new_sheet_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("n.xlsx");
        let session = WorkbookSession::create(&path, None, false).unwrap();
        session.new_sheet("Extra").unwrap();

        let reopened = WorkbookSession::open(&path).unwrap();
        assert_eq!(reopened.sheet_names(), vec!["Sheet1", "Extra"]);
    }

    #[test]
    fn test_append_sanitizes() {
        let dir = tempdir().unwrap();
        let session =
            WorkbookSession::create(dir.path().join("u.xlsx"), None, false).unwrap();
        let sheet = session.sheet(None).unwrap();

        sheet.append(&[Row::from(["héllo"])]).unwrap();
        assert_eq!(sheet.rows().unwrap(), vec![Row::from(["hllo"])]);
    }
}
