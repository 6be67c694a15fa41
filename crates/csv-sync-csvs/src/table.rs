/*!
# Table Model

The canonical in-memory representation of an uploaded CSV. A `Table` is never
mutated after construction; filters and the splitter derive new tables that
share the header row and carry their own rows.
*/

use serde::{Deserialize, Serialize};

/// Structured CSV content: a header row plus data rows of string cells
///
/// Rows are not required to have `headers.len()` cells. Lookups through
/// [`cell`] treat a missing cell as the empty string and ignore extra cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TableParts")]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    raw_text: String,
    row_count: usize,
}

/// Deserialization shape; `row_count` is always recomputed from `rows`
#[derive(Deserialize)]
struct TableParts {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    #[serde(default)]
    raw_text: String,
}

impl From<TableParts> for Table {
    fn from(parts: TableParts) -> Self {
        Table::new(parts.headers, parts.rows, parts.raw_text)
    }
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, raw_text: String) -> Self {
        let row_count = rows.len();
        Self {
            headers,
            rows,
            raw_text,
            row_count,
        }
    }

    /// Build a table that shares this table's headers but holds `rows`
    ///
    /// The source text is not re-encoded; derived tables carry an empty `raw_text`.
    pub fn derive(&self, rows: Vec<Vec<String>>) -> Self {
        Self::new(self.headers.clone(), rows, String::new())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, column)`, or `""` when either index is out of range
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows.get(row).map_or("", |r| cell(r, column))
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// Position-based cell lookup tolerant of short rows
pub fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map_or("", String::as_str)
}
