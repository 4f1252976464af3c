//! Application command handlers.

mod export_plan;
mod import_plan;
mod print_plan;

pub use export_plan::{ExportPlanCommand, ExportPlanError, ExportPlanHandler, ExportPlanResult};
pub use import_plan::{ImportPlanCommand, ImportPlanError, ImportPlanHandler, ImportPlanResult};
pub use print_plan::{PrintPlanCommand, PrintPlanError, PrintPlanHandler};
