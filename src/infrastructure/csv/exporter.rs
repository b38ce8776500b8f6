// ============================================================
// CSV EXPORT ENCODER
// ============================================================
// Encode the current table as CSV bytes safe to open in spreadsheet apps

use tracing::debug;

use crate::domain::csv::{cell, Row};

/// UTF-8 byte-order mark, prepended for Excel compatibility.
const BOM: &str = "\u{feff}";

/// Leading characters that spreadsheet apps interpret as formulas.
const FORMULA_PREFIXES: [char; 6] = ['=', '+', '-', '@', '\t', '\r'];

/// Encode `(rows, columns)` as CSV bytes.
///
/// Output is BOM-prefixed, with a comma-joined header line followed by one
/// line per row joined with `\n`. Missing cells export as the empty string.
pub fn export_to_csv(rows: &[Row], columns: &[String]) -> Vec<u8> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join(","));

    for row in rows {
        let line = columns
            .iter()
            .map(|col| encode_cell(cell(row, col)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    let output = format!("{}{}", BOM, lines.join("\n"));
    debug!(rows = rows.len(), bytes = output.len(), "encoded CSV export");
    output.into_bytes()
}

/// Encode one cell value.
///
/// Values containing a comma, double quote, or newline are quoted with
/// embedded quotes doubled. Values starting with a formula-significant
/// character are additionally neutralized with a leading single quote and
/// always quoted, so spreadsheet apps treat them as text.
fn encode_cell(value: &str) -> String {
    let neutralized = value.starts_with(&FORMULA_PREFIXES[..]);
    let value = if neutralized {
        format!("'{}", value)
    } else {
        value.to_string()
    };

    if neutralized || value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value
    }
}
