// ============================================================
// MERGE FILES USE CASE
// ============================================================
// Combine tables with heterogeneous columns into one union-column table

use std::collections::{HashMap, HashSet};

use crate::domain::csv::{cell, MergeResult, Row};

/// One parsed input file queued for merging.
#[derive(Debug, Clone)]
pub struct FileData {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
    pub filename: String,
}

/// Merge files into a single table over the union of their columns.
///
/// Union columns keep first-seen order. Rows come out in file order, then
/// original row order; a row whose source file lacked a column gets the
/// empty string there. Merge never drops rows, so `new_count` always equals
/// `original_count`.
pub fn merge_files(files: &[FileData]) -> MergeResult {
    if files.is_empty() {
        return MergeResult {
            data: Vec::new(),
            columns: Vec::new(),
            original_count: 0,
            new_count: 0,
            removed_count: 0,
            modified_count: 0,
            file_count: 0,
            message: "No files to merge".to_string(),
        };
    }

    if files.len() == 1 {
        let file = &files[0];
        return MergeResult {
            data: file.rows.clone(),
            columns: file.columns.clone(),
            original_count: file.rows.len(),
            new_count: file.rows.len(),
            removed_count: 0,
            modified_count: 0,
            file_count: 1,
            message: "Only one file provided".to_string(),
        };
    }

    // Union of all columns, first-seen order
    let mut seen: HashSet<&str> = HashSet::new();
    let mut all_columns: Vec<String> = Vec::new();
    for file in files {
        for col in &file.columns {
            if seen.insert(col.as_str()) {
                all_columns.push(col.clone());
            }
        }
    }

    let mut merged_rows: Vec<Row> = Vec::new();
    let mut original_count = 0;

    for file in files {
        original_count += file.rows.len();
        for row in &file.rows {
            let normalized: Row = all_columns
                .iter()
                .map(|col| (col.clone(), cell(row, col).to_string()))
                .collect();
            merged_rows.push(normalized);
        }
    }

    MergeResult {
        original_count,
        new_count: merged_rows.len(),
        removed_count: 0,
        modified_count: 0,
        file_count: files.len(),
        message: format!("{} files merged, {} total rows", files.len(), merged_rows.len()),
        columns: all_columns,
        data: merged_rows,
    }
}

/// Advisory pre-merge check: which of the first file's columns does each
/// later file lack? Never blocks a merge; union-fill covers the gaps.
pub fn check_column_compatibility(files: &[FileData]) -> ColumnCompatibility {
    if files.len() < 2 {
        return ColumnCompatibility {
            compatible: true,
            missing_columns: HashMap::new(),
        };
    }

    let mut missing_columns: HashMap<String, Vec<String>> = HashMap::new();

    for file in &files[1..] {
        let file_columns: HashSet<&str> = file.columns.iter().map(String::as_str).collect();
        let missing: Vec<String> = files[0]
            .columns
            .iter()
            .filter(|col| !file_columns.contains(col.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            missing_columns.insert(file.filename.clone(), missing);
        }
    }

    ColumnCompatibility {
        compatible: missing_columns.is_empty(),
        missing_columns,
    }
}

/// Result of [`check_column_compatibility`].
#[derive(Debug, Clone)]
pub struct ColumnCompatibility {
    pub compatible: bool,
    /// Filename → columns of the reference (first) file it lacks.
    pub missing_columns: HashMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn file(name: &str, columns: &[&str], rows: Vec<Row>) -> FileData {
        FileData {
            rows,
            columns: cols(columns),
            filename: name.to_string(),
        }
    }

    #[test]
    fn test_no_files() {
        let result = merge_files(&[]);
        assert_eq!(result.file_count, 0);
        assert_eq!(result.new_count, 0);
        assert_eq!(result.message, "No files to merge");
    }

    #[test]
    fn test_single_file_pass_through() {
        let rows = vec![row(&[("a", "1")])];
        let result = merge_files(&[file("one.csv", &["a"], rows.clone())]);

        assert_eq!(result.file_count, 1);
        assert_eq!(result.data, rows);
        assert_eq!(result.columns, cols(&["a"]));
        assert_eq!(result.message, "Only one file provided");
    }

    #[test]
    fn test_union_columns_first_seen_order() {
        let a = file("a.csv", &["name", "email"], vec![row(&[("name", "x")])]);
        let b = file("b.csv", &["email", "phone"], vec![row(&[("phone", "1")])]);
        let result = merge_files(&[a, b]);

        assert_eq!(result.columns, cols(&["name", "email", "phone"]));
    }

    #[test]
    fn test_missing_columns_filled_with_empty() {
        let a = file("a.csv", &["name"], vec![row(&[("name", "alice")])]);
        let b = file("b.csv", &["phone"], vec![row(&[("phone", "123")])]);
        let result = merge_files(&[a, b]);

        assert_eq!(result.new_count, 2);
        assert_eq!(result.original_count, 2);
        assert_eq!(result.data[0]["phone"], "");
        assert_eq!(result.data[1]["name"], "");
        assert_eq!(result.message, "2 files merged, 2 total rows");
    }

    #[test]
    fn test_row_order_file_then_original() {
        let a = file(
            "a.csv",
            &["n"],
            vec![row(&[("n", "1")]), row(&[("n", "2")])],
        );
        let b = file("b.csv", &["n"], vec![row(&[("n", "3")])]);
        let result = merge_files(&[a, b]);

        let order: Vec<&str> = result.data.iter().map(|r| r["n"].as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_compatibility_reports_missing() {
        let a = file("a.csv", &["name", "email"], vec![]);
        let b = file("b.csv", &["name"], vec![]);
        let report = check_column_compatibility(&[a, b]);

        assert!(!report.compatible);
        assert_eq!(report.missing_columns["b.csv"], cols(&["email"]));
    }

    #[test]
    fn test_compatibility_single_file_ok() {
        let a = file("a.csv", &["name"], vec![]);
        let report = check_column_compatibility(&[a]);
        assert!(report.compatible);
        assert!(report.missing_columns.is_empty());
    }
}
