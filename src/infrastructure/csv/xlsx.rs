// ============================================================
// XLSX EXPORT
// ============================================================
// Write the current table as a single-sheet XLSX workbook

use std::io::Cursor;
use std::path::Path;

use tracing::debug;
use umya_spreadsheet::Spreadsheet;

use crate::domain::csv::{cell, Row};
use crate::domain::error::{AppError, Result};

/// Name of the single worksheet in exported workbooks.
const SHEET_NAME: &str = "Data";

/// Encode `(rows, columns)` as XLSX workbook bytes.
///
/// One sheet named "Data": first row is the column names, data rows follow
/// in table order, missing values as empty string.
pub fn export_to_xlsx_bytes(rows: &[Row], columns: &[String]) -> Result<Vec<u8>> {
    let book = build_workbook(rows, columns)?;

    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor)
        .map_err(|e| AppError::IoError(format!("Failed to encode workbook: {}", e)))?;

    let bytes = cursor.into_inner();
    debug!(rows = rows.len(), bytes = bytes.len(), "encoded XLSX export");
    Ok(bytes)
}

/// Write `(rows, columns)` to an XLSX workbook at `path`.
pub fn export_to_xlsx(rows: &[Row], columns: &[String], path: &Path) -> Result<()> {
    let book = build_workbook(rows, columns)?;

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| AppError::IoError(format!("Failed to write workbook: {}", e)))?;

    debug!(rows = rows.len(), path = %path.display(), "wrote XLSX export");
    Ok(())
}

fn build_workbook(rows: &[Row], columns: &[String]) -> Result<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| AppError::Internal("Workbook has no worksheet".to_string()))?;
    sheet.set_name(SHEET_NAME);

    for (col_idx, column) in columns.iter().enumerate() {
        sheet
            .get_cell_mut((col_idx as u32 + 1, 1))
            .set_value(column.as_str());
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, column) in columns.iter().enumerate() {
            let value = cell(row, column);
            if !value.is_empty() {
                sheet
                    .get_cell_mut((col_idx as u32 + 1, row_idx as u32 + 2))
                    .set_value(value);
            }
        }
    }

    Ok(book)
}

/// Derive the export filename by swapping the extension for `.xlsx`.
pub fn xlsx_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{}.xlsx", stem),
        _ => format!("{}.xlsx", filename),
    }
}
