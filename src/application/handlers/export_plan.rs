//! ExportPlanHandler - Command handler for workbook export.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::domain::interchange::{export_file_stem, plan_to_sheets};
use crate::ports::{PlanState, WorkbookError, WorkbookWriter};

/// Command to export the plan as a workbook.
#[derive(Debug, Clone)]
pub struct ExportPlanCommand {
    /// Directory the workbook file is written into.
    pub output_dir: PathBuf,
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportPlanResult {
    /// Full path of the written workbook.
    pub path: PathBuf,
    /// Number of sheets written.
    pub sheet_count: usize,
}

/// Error type for plan export. The document is never touched, so any
/// failure leaves the plan exactly as it was.
#[derive(Debug, Clone, Error)]
pub enum ExportPlanError {
    #[error(transparent)]
    Workbook(#[from] WorkbookError),
}

/// Handler for exporting the plan to a workbook file.
pub struct ExportPlanHandler {
    store: Arc<dyn PlanState>,
    writer: Arc<dyn WorkbookWriter>,
}

impl ExportPlanHandler {
    pub fn new(store: Arc<dyn PlanState>, writer: Arc<dyn WorkbookWriter>) -> Self {
        Self { store, writer }
    }

    pub fn handle(&self, cmd: ExportPlanCommand) -> Result<ExportPlanResult, ExportPlanError> {
        let document = self.store.document();
        let sheets = plan_to_sheets(&document);

        let stem = export_file_stem(&document, Utc::now().date_naive());
        let path = cmd.output_dir.join(format!("{stem}.xlsx"));

        self.writer.write(&sheets, &path)?;

        tracing::info!(path = %path.display(), sheets = sheets.len(), "Exported plan workbook");
        Ok(ExportPlanResult {
            path,
            sheet_count: sheets.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryPlanStorage;
    use crate::application::PlanStore;
    use crate::domain::interchange::Sheet;
    use std::path::Path;
    use std::sync::Mutex;

    struct RecordingWriter {
        written: Mutex<Vec<(PathBuf, usize)>>,
        fail: bool,
    }

    impl RecordingWriter {
        fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    impl WorkbookWriter for RecordingWriter {
        fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), WorkbookError> {
            if self.fail {
                return Err(WorkbookError::write_failed("simulated"));
            }
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), sheets.len()));
            Ok(())
        }
    }

    fn test_store() -> Arc<PlanStore> {
        Arc::new(PlanStore::open(Arc::new(InMemoryPlanStorage::new())))
    }

    #[test]
    fn exports_four_sheets_with_slugged_filename() {
        let store = test_store();
        let writer = Arc::new(RecordingWriter::new());
        let handler = ExportPlanHandler::new(store, writer.clone());

        let result = handler
            .handle(ExportPlanCommand {
                output_dir: PathBuf::from("/tmp/exports"),
            })
            .unwrap();

        assert_eq!(result.sheet_count, 4);
        let filename = result.path.file_name().unwrap().to_string_lossy();
        assert!(filename.starts_with("success-plan-techcorp-solutions-"));
        assert!(filename.ends_with(".xlsx"));

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].1, 4);
    }

    #[test]
    fn write_failure_surfaces_and_leaves_the_plan_untouched() {
        let store = test_store();
        let before = store.document();
        let handler = ExportPlanHandler::new(store.clone(), Arc::new(RecordingWriter::failing()));

        let result = handler.handle(ExportPlanCommand {
            output_dir: PathBuf::from("/tmp/exports"),
        });

        assert!(matches!(result, Err(ExportPlanError::Workbook(_))));
        assert_eq!(store.document(), before);
    }
}
