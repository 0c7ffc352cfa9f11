//! # sheetcast
//!
//! Convert tabular spreadsheet data between XLSX, CSV, JSON and a flat XML
//! form, and edit workbook sheets through a session that keeps the on-disk
//! file consistent after every mutation.
//!
//! ## Features
//!
//! - **One tabular model**: every transform speaks [`TabularModel`], an
//!   ordered map of sheet name to row matrix
//! - **Workbook -> CSV**: one quote-all CSV file per sheet
//! - **Workbook -> JSON**: header row as keys, ordered records per sheet
//! - **XML -> Workbook**: flat tag-delimited documents become sheets
//! - **Live sheet editing**: append/overwrite/clear through [`SheetHandle`],
//!   with every mutation persisted atomically
//! - **ASCII sanitation**: values headed into the workbook codec drop
//!   non-ASCII characters for legacy compatibility
//!
//! ## Quick Start
//!
//! ### Converting a workbook
//!
//! ```rust,no_run
//! # fn main() -> sheetcast::Result<()> {
//! // One CSV per sheet, named report_0.csv, report_1.csv, ...
//! let written = sheetcast::to_csv("report.xlsx", None, false)?;
//!
//! // First row of each sheet becomes the record keys
//! let records = sheetcast::to_json("report.xlsx")?;
//! for (sheet, rows) in &records {
//!     println!("{sheet}: {} records", rows.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Editing a workbook in place
//!
//! ```rust,no_run
//! use sheetcast::{Row, WorkbookSession};
//!
//! # fn main() -> sheetcast::Result<()> {
//! let session = WorkbookSession::open("report.xlsx")?;
//! let sheet = session.sheet(Some("Data"))?;
//!
//! sheet.append(&[Row::from(["3", "Carol"])])?;
//! println!("{} rows", sheet.row_count()?);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod dates;
pub mod error;
pub mod paths;
pub mod reader;
pub mod sanitize;
pub mod session;
pub mod transform;
pub mod types;
pub mod writer;

pub use codec::Workbook;
pub use error::{Result, SheetError};
pub use reader::{read_model, WorkbookReader};
pub use session::{SheetHandle, WorkbookSession};
pub use transform::{to_csv, to_json, xml_to_workbook};
pub use types::{Record, Row, SheetRecords, TabularModel};
