// ============================================================
// DEDUPLICATE USE CASE
// ============================================================
// Remove duplicate rows keyed on a single column

use std::collections::HashSet;

use crate::domain::csv::{cell, OperationResult, Row};

/// Options for a deduplication pass.
#[derive(Debug, Clone)]
pub struct DeduplicateOptions {
    /// Column whose value identifies a duplicate.
    pub column: String,
    /// Compare values exactly; when false, keys are lower-cased first.
    pub case_sensitive: bool,
}

impl DeduplicateOptions {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// Remove rows whose key under `options.column` was already seen.
///
/// Single left-to-right pass; the first occurrence wins and relative order
/// among kept rows is preserved. A missing cell keys as the empty string, so
/// a nonexistent column collapses the table to its first row.
pub fn deduplicate(rows: &[Row], options: &DeduplicateOptions) -> OperationResult {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique_rows: Vec<Row> = Vec::with_capacity(rows.len());

    for row in rows {
        let value = cell(row, &options.column);
        let key = if options.case_sensitive {
            value.to_string()
        } else {
            value.to_lowercase()
        };

        if seen.insert(key) {
            unique_rows.push(row.clone());
        }
    }

    let removed_count = rows.len() - unique_rows.len();
    let message = match removed_count {
        0 => "No duplicates found".to_string(),
        1 => "1 duplicate removed".to_string(),
        n => format!("{} duplicates removed", n),
    };

    OperationResult {
        original_count: rows.len(),
        new_count: unique_rows.len(),
        removed_count,
        modified_count: 0,
        message,
        data: unique_rows,
    }
}
