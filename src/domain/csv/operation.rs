// ============================================================
// OPERATION RESULT TYPES
// ============================================================
// Return contracts shared by every row transformation

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Row;

/// Universal result of a row transformation.
///
/// `data` is always a fresh set of rows; inputs are never mutated in place.
/// `message` is a one-line, pluralization-aware summary for user feedback
/// only — it is not part of the semantic contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub data: Vec<Row>,
    pub original_count: usize,
    pub new_count: usize,
    pub removed_count: usize,
    pub modified_count: usize,
    pub message: String,
}

/// Result of merging multiple files: an [`OperationResult`] plus the merged
/// column order and the number of input files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeResult {
    pub data: Vec<Row>,
    pub columns: Vec<String>,
    pub original_count: usize,
    pub new_count: usize,
    pub removed_count: usize,
    pub modified_count: usize,
    pub file_count: usize,
    pub message: String,
}

/// Severity of a validation feedback overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightKind {
    Error,
    Warning,
}

/// Ephemeral cell-highlight overlay for validation feedback.
///
/// Never stored in history; cleared on any data mutation or explicit clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedCells {
    pub column: String,
    pub row_indices: HashSet<usize>,
    pub kind: HighlightKind,
}
