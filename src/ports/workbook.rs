//! Workbook Ports - spreadsheet file I/O behind the sheet mappers.
//!
//! The mappers produce and consume [`Sheet`] values; these ports move
//! them through an actual workbook file. Row-level problems never appear
//! here: a reader either yields the sheets it found or fails the whole
//! file, which is the only case that rejects an import.

use std::path::Path;

use thiserror::Error;

use crate::domain::interchange::Sheet;

/// Errors that can occur reading or writing a workbook file.
#[derive(Debug, Clone, Error)]
pub enum WorkbookError {
    #[error("Failed to open workbook: {0}")]
    Unreadable(String),

    #[error("Failed to write workbook: {0}")]
    WriteFailed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl WorkbookError {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        WorkbookError::Unreadable(reason.into())
    }

    pub fn write_failed(reason: impl Into<String>) -> Self {
        WorkbookError::WriteFailed(reason.into())
    }
}

/// Port for producing a downloadable workbook from sheets.
pub trait WorkbookWriter: Send + Sync {
    /// Writes the sheets, in order, to a workbook file at `path`.
    ///
    /// Column width hints are applied where the format supports them.
    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), WorkbookError>;
}

/// Port for parsing an uploaded workbook back into sheets.
pub trait WorkbookReader: Send + Sync {
    /// Reads every sheet of the workbook at `path`.
    ///
    /// Sheets the import does not recognize are fine; the mapper ignores
    /// them. An unreadable file is a whole-file error.
    fn read(&self, path: &Path) -> Result<Vec<Sheet>, WorkbookError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_ports_are_object_safe() {
        fn check_writer<T: WorkbookWriter + ?Sized>() {}
        fn check_reader<T: WorkbookReader + ?Sized>() {}
        check_writer::<dyn WorkbookWriter>();
        check_reader::<dyn WorkbookReader>();
    }

    #[test]
    fn workbook_error_distinguishes_read_and_write() {
        assert!(WorkbookError::unreadable("bad zip")
            .to_string()
            .contains("open"));
        assert!(WorkbookError::write_failed("disk full")
            .to_string()
            .contains("write"));
    }
}
