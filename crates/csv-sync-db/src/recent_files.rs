use crate::{
    store::{load_json, save_json, KeyValueStore},
    DbResult,
};
use chrono::{DateTime, Utc};
use csv_sync_csvs::Table;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const RECENT_FILES_KEY: &str = "csv-sync.recent-files";

pub const DEFAULT_RECENT_FILES_LIMIT: usize = 5;

/// Longest preview kept for one file, in characters
pub const PREVIEW_MAX_CHARS: usize = 80;

/// A previously loaded upload, as listed in the recent-files panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFile {
    pub id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub rows: usize,
    pub size_bytes: u64,
    pub preview: String,
}

impl RecentFile {
    pub fn from_table(name: impl Into<String>, table: &Table, size_bytes: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date: Utc::now(),
            rows: table.row_count(),
            size_bytes,
            preview: preview_line(table),
        }
    }
}

/// First data row joined by `, `, cut to [`PREVIEW_MAX_CHARS`]
pub fn preview_line(table: &Table) -> String {
    table
        .rows()
        .first()
        .map(|row| row.join(", ").chars().take(PREVIEW_MAX_CHARS).collect())
        .unwrap_or_default()
}

/// Most-recent-first list of uploads, written back on every change
pub struct RecentFiles<S: KeyValueStore> {
    store: S,
    files: Vec<RecentFile>,
    limit: usize,
}

impl<S: KeyValueStore> RecentFiles<S> {
    pub fn load(store: S, limit: usize) -> DbResult<Self> {
        let mut files: Vec<RecentFile> = load_json(&store, RECENT_FILES_KEY)?.unwrap_or_default();
        files.truncate(limit);
        Ok(Self {
            store,
            files,
            limit,
        })
    }

    pub fn files(&self) -> &[RecentFile] {
        &self.files
    }

    /// Put `file` first, dropping any older entry with the same name
    pub fn record(&mut self, file: RecentFile) -> DbResult<()> {
        self.files.retain(|existing| existing.name != file.name);
        self.files.insert(0, file);
        self.files.truncate(self.limit);
        save_json(&mut self.store, RECENT_FILES_KEY, &self.files)
    }

    pub fn clear(&mut self) -> DbResult<()> {
        self.files.clear();
        self.store.remove(RECENT_FILES_KEY)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
