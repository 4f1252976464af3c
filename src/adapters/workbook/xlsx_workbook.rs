//! XLSX workbook adapter.
//!
//! Writes sheets with `rust_xlsxwriter` and reads them back with
//! `calamine`. The adapter stays dumb: it moves cells, the interchange
//! mappers decide what they mean.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use crate::domain::interchange::{Cell, Column, Sheet};
use crate::ports::{WorkbookError, WorkbookReader, WorkbookWriter};

/// Width hint used for columns read back from a file; the original hints
/// are not stored in a recoverable way and are presentation-only anyway.
const DEFAULT_READ_WIDTH: u16 = 10;

/// XLSX file codec for plan sheets.
#[derive(Debug, Clone, Default)]
pub struct XlsxWorkbook;

impl XlsxWorkbook {
    pub fn new() -> Self {
        Self
    }
}

impl WorkbookWriter for XlsxWorkbook {
    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), WorkbookError> {
        let mut workbook = Workbook::new();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .map_err(|e| WorkbookError::write_failed(e.to_string()))?;

            for (col, column) in sheet.columns.iter().enumerate() {
                let col = col as u16;
                worksheet
                    .set_column_width(col, column.width as f64)
                    .map_err(|e| WorkbookError::write_failed(e.to_string()))?;
                worksheet
                    .write_string(0, col, &column.header)
                    .map_err(|e| WorkbookError::write_failed(e.to_string()))?;
            }

            for (row, cells) in sheet.rows.iter().enumerate() {
                let row = (row + 1) as u32;
                for (col, cell) in cells.iter().enumerate() {
                    let col = col as u16;
                    match cell {
                        Cell::Text(text) => {
                            worksheet
                                .write_string(row, col, text)
                                .map_err(|e| WorkbookError::write_failed(e.to_string()))?;
                        }
                        Cell::Number(number) => {
                            worksheet
                                .write_number(row, col, *number)
                                .map_err(|e| WorkbookError::write_failed(e.to_string()))?;
                        }
                        Cell::Empty => {}
                    }
                }
            }
        }

        workbook
            .save(path)
            .map_err(|e| WorkbookError::Io(e.to_string()))
    }
}

impl WorkbookReader for XlsxWorkbook {
    fn read(&self, path: &Path) -> Result<Vec<Sheet>, WorkbookError> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e: calamine::XlsxError| WorkbookError::unreadable(e.to_string()))?;

        let names = workbook.sheet_names().to_owned();
        let mut sheets = Vec::with_capacity(names.len());

        for name in names {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| WorkbookError::unreadable(e.to_string()))?;

            let mut rows = range.rows();
            let columns: Vec<Column> = rows
                .next()
                .map(|header_row| {
                    header_row
                        .iter()
                        .map(|data| Column::new(data_to_cell(data).display(), DEFAULT_READ_WIDTH))
                        .collect()
                })
                .unwrap_or_default();

            let mut sheet = Sheet::new(name, columns);
            for row in rows {
                sheet.push_row(row.iter().map(data_to_cell).collect());
            }
            sheets.push(sheet);
        }

        Ok(sheets)
    }
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        other => Cell::Text(other.to_string()),
    }
}
