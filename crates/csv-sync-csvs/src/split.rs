use crate::table::Table;
use tracing::debug;

/// Partition a table into contiguous parts of at most `max_rows_per_part` rows
///
/// Every part shares the original headers and row order is preserved; only the
/// last part may be shorter. A non-positive limit, or one that already covers
/// every row, yields the original table as the only part.
pub fn split(table: &Table, max_rows_per_part: i64) -> Vec<Table> {
    let total = table.row_count();
    let limit = match usize::try_from(max_rows_per_part) {
        Ok(limit) if limit > 0 && limit < total => limit,
        _ => return vec![table.clone()],
    };

    let parts: Vec<Table> = table
        .rows()
        .chunks(limit)
        .map(|chunk| table.derive(chunk.to_vec()))
        .collect();

    debug!(rows = total, parts = parts.len(), limit, "split table");
    parts
}
