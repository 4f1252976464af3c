//! ImportPlanHandler - Command handler for workbook import.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::interchange::{merge_imported, sheets_to_plan, ImportReport};
use crate::domain::plan::PlanDocument;
use crate::ports::{PlanState, StoreError, WorkbookError, WorkbookReader};

/// Command to import a plan workbook.
#[derive(Debug, Clone)]
pub struct ImportPlanCommand {
    /// Path of the uploaded workbook file.
    pub path: PathBuf,
}

/// Result of a successful import.
#[derive(Debug, Clone)]
pub struct ImportPlanResult {
    /// The committed document after the merge.
    pub document: PlanDocument,
    /// Whether the import replaced the plan wholesale (customer changed).
    pub replaced: bool,
    /// Rows and segments the mapper skipped.
    pub report: ImportReport,
}

/// Error type for plan import. Any failure here leaves the prior
/// document in place, unchanged.
#[derive(Debug, Clone, Error)]
pub enum ImportPlanError {
    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handler for importing a workbook into the store.
pub struct ImportPlanHandler {
    store: Arc<dyn PlanState>,
    reader: Arc<dyn WorkbookReader>,
}

impl ImportPlanHandler {
    pub fn new(store: Arc<dyn PlanState>, reader: Arc<dyn WorkbookReader>) -> Self {
        Self { store, reader }
    }

    pub fn handle(&self, cmd: ImportPlanCommand) -> Result<ImportPlanResult, ImportPlanError> {
        // A file that cannot be parsed at all rejects the whole import.
        let sheets = self.reader.read(&cmd.path)?;

        let (imported, report) = sheets_to_plan(&sheets);
        for entry in &report.skipped {
            tracing::debug!(
                sheet = %entry.sheet,
                row = entry.row,
                reason = %entry.reason,
                "Skipped import row"
            );
        }

        let current = self.store.document();
        let replaced = imported
            .customer_name
            .as_deref()
            .is_some_and(|name| name != current.customer_name());

        let merged = merge_imported(&current, imported);
        let document = self.store.update(crate::domain::plan::PlanUpdate::Replace(
            Box::new(merged),
        ))?;

        tracing::info!(
            replaced,
            skipped = report.skipped_count(),
            "Imported plan workbook"
        );
        Ok(ImportPlanResult {
            document,
            replaced,
            report,
        })
    }
}
