// ============================================================
// CSV SESSION
// ============================================================
// Owns the history engine and the validation highlight overlay.
// Constructed once and passed explicitly to whatever issues operations.

use tracing::debug;

use crate::domain::csv::{
    CsvData, FileStats, HighlightKind, HighlightedCells, MergeResult, OperationResult, Row,
};
use crate::infrastructure::config::Settings;

use super::deduplicate::{deduplicate, DeduplicateOptions};
use super::email_validator::{remove_invalid_emails, validate_emails, EmailValidationResult};
use super::format_text::{format_columns, TextFormat};
use super::history::{HistoryAction, HistoryEngine};

/// One editing session over a loaded table.
///
/// Wraps the [`HistoryEngine`] with the operation entry points and the
/// ephemeral cell-highlight overlay. The overlay is cleared by every data
/// mutation, undo/redo included, since row indices shift underneath it.
#[derive(Debug, Default)]
pub struct CsvSession {
    engine: HistoryEngine,
    highlighted: Option<HighlightedCells>,
}

impl CsvSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            engine: HistoryEngine::with_capacity(max_history),
            highlighted: None,
        }
    }

    /// Build a session honoring the configured history cap.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_max_history(settings.max_history)
    }

    // ---- loading & lifecycle ----

    /// Install a freshly decoded file as the new history root.
    pub fn load(&mut self, rows: Vec<Row>, columns: Vec<String>, filename: String, file_size: u64) {
        debug!(rows = rows.len(), columns = columns.len(), %filename, "loading table");
        self.engine
            .apply(HistoryAction::SetData(CsvData::new(rows, columns, filename, file_size)));
        self.highlighted = None;
    }

    /// Install an accepted merge result as a new root table.
    ///
    /// A merge changes the column shape, so it loads fresh and discards the
    /// undo history rather than stacking on it.
    pub fn accept_merge(&mut self, result: MergeResult, filename: String) {
        self.engine.apply(HistoryAction::SetData(CsvData::new(
            result.data,
            result.columns,
            filename,
            0,
        )));
        self.highlighted = None;
    }

    /// Replace the current rows with an accepted transformation result.
    pub fn update(&mut self, rows: Vec<Row>) {
        self.engine.apply(HistoryAction::UpdateData(rows));
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.engine.apply(HistoryAction::Clear);
        self.highlighted = None;
    }

    pub fn undo(&mut self) {
        self.engine.apply(HistoryAction::Undo);
        self.highlighted = None;
    }

    pub fn redo(&mut self) {
        self.engine.apply(HistoryAction::Redo);
        self.highlighted = None;
    }

    // ---- operations ----

    /// Run deduplication over the current rows and commit the result.
    pub fn apply_deduplicate(&mut self, options: &DeduplicateOptions) -> OperationResult {
        let result = deduplicate(self.engine.rows(), options);
        self.update(result.data.clone());
        result
    }

    /// Run one of the text formatters over the named columns and commit.
    pub fn apply_format(&mut self, columns: &[String], format: TextFormat) -> OperationResult {
        let result = format_columns(self.engine.rows(), columns, format);
        self.update(result.data.clone());
        result
    }

    /// Drop rows with an invalid email in `column` and commit.
    pub fn apply_remove_invalid_emails(&mut self, column: &str) -> OperationResult {
        let result = remove_invalid_emails(self.engine.rows(), column);
        self.update(result.data.clone());
        result
    }

    /// Validate emails without mutating, highlighting the invalid rows.
    pub fn validate_emails(&mut self, column: &str) -> EmailValidationResult {
        let result = validate_emails(self.engine.rows(), column);
        self.highlighted = if result.invalid_count > 0 {
            Some(HighlightedCells {
                column: column.to_string(),
                row_indices: result.invalid_reasons.keys().copied().collect(),
                kind: HighlightKind::Error,
            })
        } else {
            None
        };
        result
    }

    // ---- read access ----

    pub fn rows(&self) -> &[Row] {
        self.engine.rows()
    }

    pub fn columns(&self) -> &[String] {
        self.engine.columns()
    }

    pub fn current(&self) -> &CsvData {
        self.engine.current()
    }

    pub fn is_loaded(&self) -> bool {
        self.engine.is_loaded()
    }

    pub fn file_stats(&self) -> Option<FileStats> {
        self.engine.file_stats()
    }

    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.engine.can_redo()
    }

    pub fn highlighted_cells(&self) -> Option<&HighlightedCells> {
        self.highlighted.as_ref()
    }

    pub fn set_highlighted_cells(&mut self, cells: Option<HighlightedCells>) {
        self.highlighted = cells;
    }
}
