// ============================================================
// TEXT FORMATTER USE CASE
// ============================================================
// Column-wise cell formatting: case mapping and whitespace cleanup

use crate::domain::csv::{cell, OperationResult, Row};

/// The four supported cell formatting operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Lowercase,
    Uppercase,
    TitleCase,
    Trim,
}

/// Apply one of the formatting operations to the named columns.
pub fn format_columns(rows: &[Row], columns: &[String], format: TextFormat) -> OperationResult {
    match format {
        TextFormat::Lowercase => to_lower_case(rows, columns),
        TextFormat::Uppercase => to_upper_case(rows, columns),
        TextFormat::TitleCase => to_title_case(rows, columns),
        TextFormat::Trim => trim_whitespace(rows, columns),
    }
}

/// Lower-case every cell of the named columns.
pub fn to_lower_case(rows: &[Row], columns: &[String]) -> OperationResult {
    apply_format(rows, columns, |v| v.to_lowercase(), "lowercase")
}

/// Upper-case every cell of the named columns.
pub fn to_upper_case(rows: &[Row], columns: &[String]) -> OperationResult {
    apply_format(rows, columns, |v| v.to_uppercase(), "UPPERCASE")
}

/// Title-case every cell of the named columns.
///
/// The whole string is lower-cased first, then the first character of each
/// space-delimited token is upper-cased. Only single spaces delimit tokens;
/// punctuation and runs of spaces introduce no extra word boundaries.
pub fn to_title_case(rows: &[Row], columns: &[String]) -> OperationResult {
    apply_format(rows, columns, title_case, "Title Case")
}

/// Strip leading/trailing whitespace and collapse internal whitespace runs
/// to a single space, for every cell of the named columns.
pub fn trim_whitespace(rows: &[Row], columns: &[String]) -> OperationResult {
    apply_format(
        rows,
        columns,
        |v| v.split_whitespace().collect::<Vec<_>>().join(" "),
        "trimmed",
    )
}

fn title_case(value: &str) -> String {
    value
        .to_lowercase()
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Apply `format_fn` to every (row, column) cell, counting changed cells.
///
/// `modified_count` counts cells, not rows. A missing cell is treated as
/// empty, and formatting an empty string never counts as a modification.
fn apply_format<F>(rows: &[Row], columns: &[String], format_fn: F, label: &str) -> OperationResult
where
    F: Fn(&str) -> String,
{
    let mut modified_count = 0;

    let new_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let mut new_row = row.clone();
            for column in columns {
                let original = cell(row, column);
                let formatted = format_fn(original);
                if formatted != original {
                    modified_count += 1;
                }
                new_row.insert(column.clone(), formatted);
            }
            new_row
        })
        .collect();

    let message = match modified_count {
        0 => "No changes needed".to_string(),
        1 => format!("1 cell formatted to {}", label),
        n => format!("{} cells formatted to {}", n, label),
    };

    OperationResult {
        original_count: rows.len(),
        new_count: rows.len(),
        removed_count: 0,
        modified_count,
        message,
        data: new_rows,
    }
}
