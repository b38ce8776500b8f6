// ============================================================
// EMAIL VALIDATOR USE CASE
// ============================================================
// Syntactic email validation (RFC 5322 simplified) and invalid-row removal

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::domain::csv::{cell, OperationResult, Row};

// Domain labels: alphanumeric, optionally hyphenated, never starting or
// ending with a hyphen. Values are lower-cased before matching.
static DOMAIN_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").unwrap());

// Characters permitted in the local part (dot-atom plus common specials).
static LOCAL_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+$").unwrap());

/// Outcome of validating one column of every row.
#[derive(Debug, Clone)]
pub struct EmailValidationResult {
    pub valid: Vec<Row>,
    pub invalid: Vec<Row>,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Original row index → first failing check.
    pub invalid_reasons: HashMap<usize, String>,
}

/// Check one email value, returning the first failing rule.
///
/// Checks run against the trimmed, lower-cased value; the caller keeps or
/// drops the original row. Rules are ordered so the most structural problem
/// wins: emptiness, `@` count, local part, domain, domain labels, and only
/// then the local-part character set.
pub fn check_email(email: &str) -> Option<&'static str> {
    let trimmed = email.trim().to_lowercase();
    if trimmed.is_empty() {
        return Some("Empty email");
    }

    match trimmed.matches('@').count() {
        0 => return Some("Missing @"),
        1 => {}
        _ => return Some("Multiple @ symbols"),
    }

    let (local, domain) = trimmed
        .split_once('@')
        .unwrap_or((trimmed.as_str(), ""));

    if local.is_empty() {
        return Some("Missing local part");
    }
    if local.len() > 64 {
        return Some("Local part too long");
    }
    if local.starts_with('.') || local.ends_with('.') {
        return Some("Local part cannot start or end with dot");
    }
    if local.contains("..") {
        return Some("Consecutive dots in local part");
    }

    if domain.is_empty() {
        return Some("Missing domain");
    }
    if domain.len() > 253 {
        return Some("Domain too long");
    }
    if !domain.contains('.') {
        return Some("Missing TLD");
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Some("Domain cannot start or end with dot");
    }
    if domain.contains("..") {
        return Some("Consecutive dots in domain");
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let tld = labels[labels.len() - 1];
    if tld.len() < 2 {
        return Some("Invalid TLD");
    }
    if labels.iter().any(|l| l.is_empty() || l.len() > 63) {
        return Some("Invalid domain label length");
    }
    if labels.iter().any(|l| !DOMAIN_LABEL_RE.is_match(l)) {
        return Some("Invalid domain format");
    }

    if !LOCAL_PART_RE.is_match(local) {
        return Some("Invalid characters in local part");
    }

    None
}

/// Partition rows into valid/invalid by the email in `column`.
///
/// Every invalid row gets an entry in `invalid_reasons` keyed by its
/// original index; `valid_count + invalid_count` always equals the input
/// row count.
pub fn validate_emails(rows: &[Row], column: &str) -> EmailValidationResult {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    let mut invalid_reasons = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        match check_email(cell(row, column)) {
            None => valid.push(row.clone()),
            Some(reason) => {
                invalid.push(row.clone());
                invalid_reasons.insert(index, reason.to_string());
            }
        }
    }

    EmailValidationResult {
        valid_count: valid.len(),
        invalid_count: invalid.len(),
        valid,
        invalid,
        invalid_reasons,
    }
}

/// Keep only rows whose email in `column` is valid, preserving order.
pub fn remove_invalid_emails(rows: &[Row], column: &str) -> OperationResult {
    let result = validate_emails(rows, column);

    let message = match result.invalid_count {
        0 => "All emails are valid".to_string(),
        1 => "1 invalid email removed".to_string(),
        n => format!("{} invalid emails removed", n),
    };

    OperationResult {
        original_count: rows.len(),
        new_count: result.valid_count,
        removed_count: result.invalid_count,
        modified_count: 0,
        message,
        data: result.valid,
    }
}
