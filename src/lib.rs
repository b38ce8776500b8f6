//! cleancsv — a client-local CSV cleaning engine.
//!
//! Load a delimited-text file into an in-memory table, apply pure row
//! transformations (deduplicate, text formatting, email validation and
//! removal, multi-file merge), step through them with undo/redo, and export
//! the result as CSV or an XLSX workbook. Everything runs locally; there is
//! no server component.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::deduplicate::{deduplicate, DeduplicateOptions};
pub use application::use_cases::email_validator::{
    remove_invalid_emails, validate_emails, EmailValidationResult,
};
pub use application::use_cases::format_text::{format_columns, TextFormat};
pub use application::use_cases::history::{HistoryAction, HistoryEngine};
pub use application::use_cases::merge_files::{
    check_column_compatibility, merge_files, FileData,
};
pub use application::use_cases::session::CsvSession;
pub use domain::csv::{CsvData, FileStats, MergeResult, OperationResult, Row};
pub use domain::error::{AppError, Result};
pub use infrastructure::config::Settings;
pub use infrastructure::csv::{
    export_to_csv, export_to_xlsx, export_to_xlsx_bytes, CsvDecoder, DecodedCsv,
};

/// Install a `tracing` subscriber honoring `RUST_LOG`, for binaries and
/// integration tests that want log output.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
