// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for the cleaning engine
// No I/O, no async, no external dependencies

mod operation;
mod table;

pub use operation::{HighlightKind, HighlightedCells, MergeResult, OperationResult};
pub use table::{cell, CsvData, FileStats, Row};
