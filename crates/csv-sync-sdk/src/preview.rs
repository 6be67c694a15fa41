/*!
# Preview Helpers

Table views for the preview grid: column sorting with natural ordering, the
"main columns only" projection and paging.
*/

use csv_sync_csvs::{cell, ColumnRoles, Table};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rows shown before the first "load more"
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Stable sort of the rows by one column; missing cells sort as `""`
pub fn sort_rows(table: &Table, column: usize, direction: SortDirection) -> Table {
    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| {
        let ordering = natural_cmp(cell(a, column), cell(b, column));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    table.derive(rows)
}

/// Projection onto the phone, template and message columns
///
/// When none of the roles resolve the table is returned unchanged.
pub fn main_columns(table: &Table) -> Table {
    let columns = ColumnRoles::resolve(table.headers()).resolved();
    if columns.is_empty() {
        return table.clone();
    }

    let headers = columns
        .iter()
        .map(|&col| cell(table.headers(), col).to_owned())
        .collect();
    let rows = table
        .rows()
        .iter()
        .map(|row| columns.iter().map(|&col| cell(row, col).to_owned()).collect())
        .collect();

    Table::new(headers, rows, String::new())
}

/// The first `limit` rows
pub fn page(table: &Table, limit: usize) -> &[Vec<String>] {
    let rows = table.rows();
    &rows[..limit.min(rows.len())]
}

/// Compare strings with digit runs ordered by numeric value
///
/// `"item2" < "item10"`; text runs compare case-insensitively, with the raw
/// strings as the final tie-break so the order is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = runs(a);
    let right = runs(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (is_digit_run(l), is_digit_run(r)) {
            (true, true) => cmp_numeric(l, r),
            _ => l.to_lowercase().cmp(&r.to_lowercase()),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

fn runs(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut previous: Option<bool> = None;

    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if previous.is_some_and(|p| p != digit) {
            out.push(&s[start..i]);
            start = i;
        }
        previous = Some(digit);
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}

fn is_digit_run(run: &str) -> bool {
    run.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_sync_testing::raw_table;

    #[test]
    fn test_natural_order() {
        let mut values = vec!["item10", "item2", "Item1", "item02b", "", "10", "9"];
        values.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(values, vec!["", "9", "10", "Item1", "item2", "item02b", "item10"]);
    }

    #[test]
    fn test_sort_rows_both_directions() {
        let table = raw_table(
            &["phone", "n"],
            &[&["a", "10"], &["b", "2"], &["c"], &["d", "33"]],
        );

        let asc = sort_rows(&table, 1, SortDirection::Asc);
        let order: Vec<&str> = asc.rows().iter().map(|r| cell(r, 0)).collect();
        assert_eq!(order, vec!["c", "b", "a", "d"]);

        let desc = sort_rows(&table, 1, SortDirection::Desc);
        let order: Vec<&str> = desc.rows().iter().map(|r| cell(r, 0)).collect();
        assert_eq!(order, vec!["d", "a", "b", "c"]);
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
    }

    #[test]
    fn test_main_columns_projection() {
        let table = raw_table(
            &["id", "reply_message_text", "phone", "city", "template_title"],
            &[&["1", "Oi", "11999990000", "SP", "promo"], &["2", "Olá"]],
        );
        let main = main_columns(&table);

        assert_eq!(main.headers(), ["phone", "template_title", "reply_message_text"]);
        assert_eq!(main.rows()[0], vec!["11999990000", "promo", "Oi"]);
        assert_eq!(main.rows()[1], vec!["", "", "Olá"]);
    }

    #[test]
    fn test_main_columns_without_roles() {
        let table = raw_table(&["a", "b"], &[&["1", "2"]]);
        assert_eq!(main_columns(&table), table);
    }

    #[test]
    fn test_paging() {
        let rows: Vec<[&str; 1]> = (0..25).map(|_| ["x"]).collect();
        let refs: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let table = raw_table(&["phone"], &refs);

        assert_eq!(page(&table, DEFAULT_PAGE_SIZE).len(), 10);
        assert_eq!(page(&table, 500).len(), 25);
    }
}
