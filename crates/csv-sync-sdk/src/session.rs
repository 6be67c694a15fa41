/*!
# Wrangling Session

State for one uploaded file while the user filters and exports it. Filters
always run against the original upload, so applying a new [`FilterSpec`]
replaces the previous result instead of narrowing it further.
*/

use crate::{
    analyzer::{analyze, Stats},
    errors::SdkResult,
    exporter::{export, export_parts, ExportOptions},
    filters::{apply_filters, FilterOutcome, FilterSpec},
};
use csv_sync_csvs::Table;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Session {
    file_name: String,
    original: Table,
    filtered: Table,
    spec: FilterSpec,
    stats: Stats,
}

impl Session {
    pub fn open(file_name: impl Into<String>, table: Table) -> Self {
        let stats = analyze(&table);
        Self {
            file_name: file_name.into(),
            filtered: table.clone(),
            original: table,
            spec: FilterSpec::default(),
            stats,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn original(&self) -> &Table {
        &self.original
    }

    pub fn filtered(&self) -> &Table {
        &self.filtered
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn apply(&mut self, spec: FilterSpec) -> &Stats {
        let FilterOutcome { table, stats } = apply_filters(&self.original, &spec);
        debug!(
            "{}: {} of {} rows kept",
            self.file_name,
            table.row_count(),
            self.original.row_count()
        );

        self.filtered = table;
        self.stats = stats;
        self.spec = spec;
        &self.stats
    }

    pub fn reset(&mut self) {
        self.spec = FilterSpec::default();
        self.filtered = self.original.clone();
        self.stats = analyze(&self.original);
    }

    pub fn export(&self, options: &ExportOptions) -> SdkResult<String> {
        export(&self.filtered, options)
    }

    pub fn export_parts(
        &self,
        options: &ExportOptions,
        max_rows_per_part: i64,
    ) -> SdkResult<Vec<String>> {
        export_parts(&self.filtered, options, max_rows_per_part)
    }
}
