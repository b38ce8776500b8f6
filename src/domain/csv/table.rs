// ============================================================
// TABLE TYPES
// ============================================================
// In-memory representation of a loaded delimited-text file

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single data row: an open column-name → cell-value mapping.
///
/// Column sets are only known at load time and vary per file when merging,
/// so rows stay a genuine string map rather than a fixed struct. A missing
/// key reads as the empty string everywhere; empty string is the canonical
/// "no value" representation.
pub type Row = HashMap<String, String>;

/// Read a cell, treating a missing column as empty.
pub fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// One loaded table: ordered rows plus the ordered, unique column names.
///
/// Column order drives display and export. Row order is preserved by every
/// operation except those whose contract removes rows (deduplicate, invalid
/// email removal).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvData {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
    pub filename: String,
    pub file_size: u64,
}

impl CsvData {
    pub fn new(rows: Vec<Row>, columns: Vec<String>, filename: String, file_size: u64) -> Self {
        Self {
            rows,
            columns,
            filename,
            file_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn stats(&self) -> FileStats {
        FileStats {
            filename: self.filename.clone(),
            row_count: self.rows.len(),
            column_count: self.columns.len(),
            columns: self.columns.clone(),
            file_size: self.file_size,
        }
    }
}

/// Summary of the currently loaded file, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStats {
    pub filename: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub file_size: u64,
}
