//! Workbook reading into the tabular model

use crate::dates::{self, DateMode};
use crate::error::{Result, SheetError};
use crate::paths;
use crate::types::{Row, TabularModel};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::path::Path;

/// Workbook file reader producing [`TabularModel`] values.
///
/// # Examples
///
/// ```no_run
/// use sheetcast::reader::WorkbookReader;
///
/// # fn main() -> sheetcast::Result<()> {
/// let mut reader = WorkbookReader::open("data.xlsx")?;
/// let model = reader.read_model()?;
/// for (sheet, rows) in model.iter() {
///     println!("{sheet}: {} rows", rows.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct WorkbookReader {
    workbook: Sheets<std::io::BufReader<std::fs::File>>,
}

impl WorkbookReader {
    /// Open a workbook file for reading.
    ///
    /// # Errors
    ///
    /// [`SheetError::InvalidFormat`] if `path` lacks the workbook extension,
    /// [`SheetError::NotFound`] if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        paths::require_workbook_extension(path)?;
        if !path.exists() {
            return Err(SheetError::NotFound(path.display().to_string()));
        }

        let workbook = open_workbook_auto(path)?;
        Ok(WorkbookReader { workbook })
    }

    /// Sheet names in file order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// Number of sheets in the workbook
    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_names().len()
    }

    /// Read every sheet into a [`TabularModel`], preserving sheet order.
    ///
    /// Cells are normalized to text; date cells resolve to calendar values
    /// under the workbook's epoch mode.
    pub fn read_model(&mut self) -> Result<TabularModel> {
        let mut model = TabularModel::new();

        for name in self.sheet_names() {
            let range = self.workbook.worksheet_range(&name)?;
            let mut rows = Vec::with_capacity(range.height());

            for row in range.rows() {
                rows.push(row.iter().map(cell_to_string).collect::<Row>());
            }

            model.insert_sheet(name, rows);
        }

        Ok(model)
    }

    /// Read one sheet's rows by name.
    ///
    /// # Errors
    ///
    /// [`SheetError::SheetNotFound`] listing the available sheets when `name`
    /// does not exist.
    pub fn read_sheet(&mut self, name: &str) -> Result<Vec<Row>> {
        let range = self.workbook.worksheet_range(name).map_err(|e| {
            if e.to_string().contains("not found") {
                SheetError::SheetNotFound {
                    sheet: name.to_string(),
                    available: self.sheet_names().join(", "),
                }
            } else {
                SheetError::from(e)
            }
        })?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect::<Row>())
            .collect())
    }
}

/// Read the workbook at `path` into a [`TabularModel`]
pub fn read_model<P: AsRef<Path>>(path: P) -> Result<TabularModel> {
    WorkbookReader::open(path)?.read_model()
}

/// Normalize one decoded cell to its text form.
///
/// Dates go through the codec's epoch-aware resolution; serials the codec
/// cannot place on the calendar fall back to the 1900-system conversion, and
/// failing that stay numeric.
pub(crate) fn cell_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .or_else(|| dates::serial_to_datetime(dt.as_f64(), DateMode::Epoch1900))
            .map(dates::format_datetime)
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}
