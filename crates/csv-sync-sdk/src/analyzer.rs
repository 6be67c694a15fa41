/*!
# Table Statistics

Summary counts shown next to the preview: how many records, how many usable
phone numbers, how many repeats, how many rows with nothing to send.
*/

use crate::phone::{is_valid, normalize};
use csv_sync_csvs::{cell, ColumnRoles, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Summary of one table; always recomputed, never updated in place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of data rows
    pub total_records: usize,

    /// Rows whose normalized phone passes the validity heuristic
    pub valid_phone_numbers: usize,

    /// Valid phones whose normalized value was already seen in an earlier row
    pub duplicate_phone_numbers: usize,

    /// Rows whose message cell is empty, whitespace-only or missing
    pub empty_messages: usize,

    /// Phone cells rewritten by format correction, when that filter ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_phone_numbers: Option<usize>,
}

/// Compute statistics for a table, resolving its columns by header name
pub fn analyze(table: &Table) -> Stats {
    analyze_with_roles(table, &ColumnRoles::resolve(table.headers()))
}

/// Compute statistics using already-resolved column roles
///
/// Without a phone column the phone counts stay at zero; without a message
/// column no message is counted as empty.
pub fn analyze_with_roles(table: &Table, roles: &ColumnRoles) -> Stats {
    let mut stats = Stats {
        total_records: table.row_count(),
        ..Stats::default()
    };
    let mut seen = HashSet::new();

    for row in table.rows() {
        if let Some(phone_col) = roles.phone {
            let phone = normalize(cell(row, phone_col));
            if is_valid(&phone) {
                stats.valid_phone_numbers += 1;
                if !seen.insert(phone) {
                    stats.duplicate_phone_numbers += 1;
                }
            }
        }

        if let Some(message_col) = roles.message {
            if is_blank(cell(row, message_col)) {
                stats.empty_messages += 1;
            }
        }
    }

    stats
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_sync_testing::{campaign_table, contacts_table, raw_table};

    #[test]
    fn test_analyze_campaign() {
        let stats = analyze(&campaign_table());

        assert_eq!(stats.total_records, 6);
        // "(11) 98765-4321", "011987654321", "21 99999-0000", "5531988887777"
        assert_eq!(stats.valid_phone_numbers, 4);
        // the trunk-prefixed number repeats the first one once normalized
        assert_eq!(stats.duplicate_phone_numbers, 1);
        // "" and "   "
        assert_eq!(stats.empty_messages, 2);
        assert_eq!(stats.corrected_phone_numbers, None);
    }

    #[test]
    fn test_short_rows_count_as_empty_messages() {
        let table = raw_table(
            &["phone", "template_title", "reply_message_text"],
            &[&["11999990000"], &["11999990001", "t"], &["11999990002", "t", "ok"]],
        );
        let stats = analyze(&table);

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.valid_phone_numbers, 3);
        assert_eq!(stats.empty_messages, 2);
    }

    #[test]
    fn test_missing_columns_leave_counts_at_zero() {
        let table = raw_table(&["name", "city"], &[&["Ana", "SP"], &["Bia", ""]]);
        let stats = analyze(&table);

        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.valid_phone_numbers, 0);
        assert_eq!(stats.duplicate_phone_numbers, 0);
        assert_eq!(stats.empty_messages, 0);
    }

    #[test]
    fn test_invalid_numbers_are_not_deduplicated() {
        let table = contacts_table(&[("123", "t", "m"), ("123", "t", "m")]);
        let stats = analyze(&table);

        assert_eq!(stats.valid_phone_numbers, 0);
        assert_eq!(stats.duplicate_phone_numbers, 0);
    }
}
