//! Workbook adapters.

mod xlsx_workbook;

pub use xlsx_workbook::XlsxWorkbook;
