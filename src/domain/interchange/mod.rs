//! Interchange mappers - the plan as sheets and as a printable tree.
//!
//! Pure field mapping in both directions; external file formats are the
//! business of the workbook and print adapters.

pub mod import;
pub mod print;
pub mod sheets;

pub use import::{merge_imported, sheets_to_plan, ImportReport, ImportedPlan, SkippedEntry};
pub use print::{
    plan_to_print, print_file_stem, BreakHint, DeltaBadge, KpiTile, PrintBlock, PrintCard,
    PrintDocument, PrintSection,
};
pub use sheets::{
    export_file_stem, kpi_summary, plan_to_sheets, Cell, Column, Sheet, OBJECTIVES_SHEET,
    OVERVIEW_SHEET, STAKEHOLDERS_SHEET, VALUE_SHEET,
};
