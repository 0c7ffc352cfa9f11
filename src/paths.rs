//! Path predicates and directory listing for workbook files

use crate::error::{Result, SheetError};
use std::path::Path;

/// The recognized workbook file extension (without the dot)
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Check whether `path` is an existing directory
pub fn is_directory<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Check whether `path` carries the recognized workbook extension.
///
/// Extension-only predicate; the file does not have to exist.
pub fn has_workbook_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION))
}

/// Check whether `path` exists as a regular file and has the workbook extension
pub fn is_workbook_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file() && has_workbook_extension(&path)
}

/// List the files in `directory` whose extension matches `extension`.
///
/// `extension` may be given with or without a leading dot. Entries are sorted
/// by name so the result is deterministic across platforms. When
/// `include_full_path` is false only the file names are returned.
///
/// # Errors
///
/// [`SheetError::NotADirectory`] if `directory` is not a directory.
pub fn list_files<P: AsRef<Path>>(
    directory: P,
    extension: &str,
    include_full_path: bool,
) -> Result<Vec<String>> {
    let directory = directory.as_ref();
    if !directory.is_dir() {
        return Err(SheetError::NotADirectory(directory.display().to_string()));
    }

    let wanted = extension.trim_start_matches('.');
    let mut out = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted));
        if !matches {
            continue;
        }
        if include_full_path {
            out.push(path.display().to_string());
        } else {
            out.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    out.sort();
    Ok(out)
}

/// Reject paths without the workbook extension before any I/O happens
pub(crate) fn require_workbook_extension(path: &Path) -> Result<()> {
    if has_workbook_extension(path) {
        Ok(())
    } else {
        Err(SheetError::InvalidFormat(path.display().to_string()))
    }
}
