//! Error types for sheetcast operations

use thiserror::Error;

/// Result type alias for sheetcast operations
pub type Result<T> = std::result::Result<T, SheetError>;

/// Main error type for all conversion and workbook operations
#[derive(Error, Debug)]
pub enum SheetError {
    /// Path does not carry the recognized workbook extension
    #[error("Not a workbook file (expected .xlsx): {0}")]
    InvalidFormat(String),

    /// Expected file was absent
    #[error("File not found: {0}")]
    NotFound(String),

    /// Target file already exists and overwrite was not requested
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    /// Directory-only operation was given a non-directory path
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Requested sheet does not exist in the workbook
    #[error("Sheet '{sheet}' not found. Available sheets: {available}")]
    SheetNotFound { sheet: String, available: String },

    /// Handle refers to a sheet object that was replaced by a `clear`
    #[error("Stale handle: sheet '{0}' was cleared through another handle")]
    StaleHandle(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook codec error wrapper
    #[error("Codec error: {0}")]
    Codec(String),

    /// CSV writer error wrapper
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XML document error
    #[error("XML error: {0}")]
    Xml(String),
}

impl From<calamine::Error> for SheetError {
    fn from(err: calamine::Error) -> Self {
        SheetError::Codec(err.to_string())
    }
}

impl From<calamine::XlsxError> for SheetError {
    fn from(err: calamine::XlsxError) -> Self {
        SheetError::Codec(err.to_string())
    }
}

impl From<zip::result::ZipError> for SheetError {
    fn from(err: zip::result::ZipError) -> Self {
        SheetError::Codec(err.to_string())
    }
}

impl From<quick_xml::Error> for SheetError {
    fn from(err: quick_xml::Error) -> Self {
        SheetError::Xml(err.to_string())
    }
}
