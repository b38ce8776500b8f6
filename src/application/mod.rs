pub mod use_cases;

pub use use_cases::deduplicate::{deduplicate, DeduplicateOptions};
pub use use_cases::email_validator::{
    check_email, remove_invalid_emails, validate_emails, EmailValidationResult,
};
pub use use_cases::format_text::{
    format_columns, to_lower_case, to_title_case, to_upper_case, trim_whitespace, TextFormat,
};
pub use use_cases::history::{HistoryAction, HistoryEngine, MAX_HISTORY};
pub use use_cases::merge_files::{
    check_column_compatibility, merge_files, ColumnCompatibility, FileData,
};
pub use use_cases::session::CsvSession;
