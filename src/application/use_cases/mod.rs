pub mod deduplicate;
pub mod email_validator;
pub mod format_text;
pub mod history;
pub mod merge_files;
pub mod session;
