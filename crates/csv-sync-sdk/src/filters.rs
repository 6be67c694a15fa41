/*!
# Filter Engine

Applies a [`FilterSpec`] to a table in a fixed order, each stage working on
the rows the previous stage kept:

1. phone format correction
2. duplicate-phone removal
3. message filter
4. template filter

Correction has to run before de-duplication so that `011987654321` and
`(11) 98765-4321` are recognised as the same contact.
*/

use crate::{
    analyzer::{analyze_with_roles, is_blank, Stats},
    phone::normalize,
};
use csv_sync_csvs::{cell, ColumnRole, ColumnRoles, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Phone-number stages of the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneOptions {
    pub remove_duplicates: bool,
    pub fix_format: bool,
}

/// Row filter on the text of one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "pattern", rename_all = "camelCase")]
pub enum TextFilter {
    /// Keep every row
    #[default]
    All,
    /// Keep rows whose cell is empty, whitespace-only or missing
    Empty,
    /// Keep rows whose cell has visible text
    WithContent,
    /// Keep rows whose cell contains every whitespace-separated token,
    /// ignoring case
    Custom(String),
}

impl TextFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, TextFilter::All)
    }

    fn matcher(&self) -> TextMatcher {
        match self {
            TextFilter::All => TextMatcher::All,
            TextFilter::Empty => TextMatcher::Empty,
            TextFilter::WithContent => TextMatcher::WithContent,
            TextFilter::Custom(pattern) => TextMatcher::Tokens(
                pattern
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect(),
            ),
        }
    }
}

/// A [`TextFilter`] with its custom pattern tokenized once
enum TextMatcher {
    All,
    Empty,
    WithContent,
    Tokens(Vec<String>),
}

impl TextMatcher {
    fn keeps(&self, value: &str) -> bool {
        match self {
            TextMatcher::All => true,
            TextMatcher::Empty => is_blank(value),
            TextMatcher::WithContent => !is_blank(value),
            TextMatcher::Tokens(tokens) => {
                let value = value.to_lowercase();
                tokens.iter().all(|token| value.contains(token.as_str()))
            }
        }
    }
}

/// Declarative filter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub phone_numbers: PhoneOptions,
    #[serde(default)]
    pub messages: TextFilter,
    #[serde(default)]
    pub templates: TextFilter,
}

impl FilterSpec {
    /// True when applying this spec would return the rows unchanged
    pub fn is_noop(&self) -> bool {
        !self.phone_numbers.fix_format
            && !self.phone_numbers.remove_duplicates
            && self.messages.is_all()
            && self.templates.is_all()
    }
}

/// Filtered table plus statistics recomputed over it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub table: Table,
    pub stats: Stats,
}

/// Apply every enabled stage of `spec` to `table`, in order
///
/// The input table is left untouched. A stage whose column cannot be found is
/// skipped. `stats.corrected_phone_numbers` is set whenever format correction
/// is enabled.
pub fn apply_filters(table: &Table, spec: &FilterSpec) -> FilterOutcome {
    let roles = ColumnRoles::resolve(table.headers());
    let mut rows: Vec<Vec<String>> = table.rows().to_vec();
    let mut corrected = None;

    if spec.phone_numbers.fix_format {
        let count = match roles.phone {
            Some(col) => fix_format(&mut rows, col),
            None => {
                warn!("format correction skipped: no phone column");
                0
            }
        };
        debug!(corrected = count, "fixed phone formats");
        corrected = Some(count);
    }

    if spec.phone_numbers.remove_duplicates {
        match roles.phone {
            Some(col) => {
                let before = rows.len();
                rows = remove_duplicates(rows, col);
                debug!(removed = before - rows.len(), "removed duplicate phones");
            }
            None => warn!("duplicate removal skipped: no phone column"),
        }
    }

    rows = filter_text(rows, &spec.messages, roles.message, ColumnRole::Message);
    rows = filter_text(rows, &spec.templates, roles.template, ColumnRole::TemplateTitle);

    let filtered = table.derive(rows);
    let mut stats = analyze_with_roles(&filtered, &roles);
    stats.corrected_phone_numbers = corrected;

    debug!(
        before = table.row_count(),
        after = filtered.row_count(),
        "applied filters"
    );

    FilterOutcome {
        table: filtered,
        stats,
    }
}

/// Replace each phone cell with its normalized form; returns how many changed
fn fix_format(rows: &mut [Vec<String>], col: usize) -> usize {
    let mut changed = 0;
    for row in rows.iter_mut() {
        if let Some(value) = row.get_mut(col) {
            let normalized = normalize(value);
            if *value != normalized {
                *value = normalized;
                changed += 1;
            }
        }
    }
    changed
}

/// Keep the first row for each normalized phone
///
/// Rows without any phone digits have no key and are always kept.
fn remove_duplicates(rows: Vec<Vec<String>>, col: usize) -> Vec<Vec<String>> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| {
            let key = normalize(cell(row, col));
            key.is_empty() || seen.insert(key)
        })
        .collect()
}

fn filter_text(
    rows: Vec<Vec<String>>,
    filter: &TextFilter,
    col: Option<usize>,
    role: ColumnRole,
) -> Vec<Vec<String>> {
    if filter.is_all() {
        return rows;
    }

    let Some(col) = col else {
        warn!(column = %role, "text filter skipped: column not found");
        return rows;
    };

    let matcher = filter.matcher();
    let before = rows.len();
    let kept: Vec<Vec<String>> = rows
        .into_iter()
        .filter(|row| matcher.keeps(cell(row, col)))
        .collect();

    debug!(column = %role, removed = before - kept.len(), "applied text filter");
    kept
}
