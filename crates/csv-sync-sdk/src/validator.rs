/*!
# Upload Validation

Two passes over a freshly parsed table:

- [`validate_structure`] is the acceptance gate: the required columns must be
  present or the upload is refused.
- [`validate_advanced`] is advisory: it lists problems worth showing the user
  but never blocks anything.
*/

use crate::phone::{is_valid, normalize};
use csv_sync_csvs::{cell, find_column, ColumnRoles, Table, REQUIRED_HEADERS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many row numbers an issue message lists before summarizing
const MAX_LISTED_ROWS: usize = 5;

/// Outcome of the advisory pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }
}

/// True when every required header is present (case-insensitive, substring-tolerant)
pub fn validate_structure(table: &Table) -> bool {
    missing_required_headers(table).is_empty()
}

/// Required header names that cannot be located in the table
pub fn missing_required_headers(table: &Table) -> Vec<&'static str> {
    REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|name| find_column(table.headers(), &[name]).is_none())
        .collect()
}

/// Advisory checks: missing headers, ragged rows, invalid and duplicate phones
///
/// Row numbers in messages count data rows from 1.
pub fn validate_advanced(table: &Table) -> ValidationReport {
    let mut issues = Vec::new();

    if table.headers().iter().all(|h| h.trim().is_empty()) {
        issues.push("CSV has no header row".to_string());
        return ValidationReport::from_issues(issues);
    }

    let expected = table.headers().len();
    let ragged: Vec<usize> = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.len() != expected)
        .map(|(i, _)| i + 1)
        .collect();
    if !ragged.is_empty() {
        issues.push(format!(
            "{} row(s) do not have {} cells: {}",
            ragged.len(),
            expected,
            list_rows(&ragged)
        ));
    }

    let roles = ColumnRoles::resolve(table.headers());
    let Some(phone_col) = roles.phone else {
        issues.push("No phone column found".to_string());
        return ValidationReport::from_issues(issues);
    };

    let mut invalid = Vec::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (i, row) in table.rows().iter().enumerate() {
        let number = normalize(cell(row, phone_col));
        if !is_valid(&number) {
            invalid.push(i + 1);
            continue;
        }
        if first_seen.contains_key(&number) {
            duplicates.push(i + 1);
        } else {
            first_seen.insert(number, i + 1);
        }
    }

    if !invalid.is_empty() {
        issues.push(format!(
            "{} invalid phone number(s): {}",
            invalid.len(),
            list_rows(&invalid)
        ));
    }
    if !duplicates.is_empty() {
        issues.push(format!(
            "{} duplicate phone number(s): {}",
            duplicates.len(),
            list_rows(&duplicates)
        ));
    }

    ValidationReport::from_issues(issues)
}

fn list_rows(rows: &[usize]) -> String {
    let listed: Vec<String> = rows
        .iter()
        .take(MAX_LISTED_ROWS)
        .map(|r| format!("row {r}"))
        .collect();
    let mut text = listed.join(", ");
    if rows.len() > MAX_LISTED_ROWS {
        text.push_str(&format!(" and {} more", rows.len() - MAX_LISTED_ROWS));
    }
    text
}
