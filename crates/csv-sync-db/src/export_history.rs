use crate::{
    store::{load_json, save_json, KeyValueStore},
    DbResult,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use csv_sync_sdk::ExportFormat;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

pub const EXPORT_HISTORY_KEY: &str = "csv-sync.export-history";

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// What the caller knows about an export before it is recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExportRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub format: ExportFormat,
    pub row_count: usize,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub scheduled_for: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: Uuid,
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub export: NewExportRecord,
}

/// Export log, newest first
pub struct ExportHistory<S: KeyValueStore> {
    store: S,
    records: Vec<ExportRecord>,
    limit: usize,
}

impl<S: KeyValueStore> ExportHistory<S> {
    pub fn load(store: S, limit: usize) -> DbResult<Self> {
        let mut records: Vec<ExportRecord> =
            load_json(&store, EXPORT_HISTORY_KEY)?.unwrap_or_default();
        records.sort_by(|a, b| b.exported_at.cmp(&a.exported_at));
        Ok(Self {
            store,
            records,
            limit,
        })
    }

    /// Newest records first, at most the configured limit
    pub fn list(&self) -> &[ExportRecord] {
        &self.records[..self.records.len().min(self.limit)]
    }

    pub fn get(&self, id: Uuid) -> Option<&ExportRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn save(&mut self, export: NewExportRecord) -> DbResult<ExportRecord> {
        let record = ExportRecord {
            id: Uuid::new_v4(),
            exported_at: Utc::now(),
            export,
        };

        self.records.insert(0, record.clone());
        self.records.truncate(self.limit);
        save_json(&mut self.store, EXPORT_HISTORY_KEY, &self.records)?;

        info!("Recorded export {} ({})", record.export.name, record.id);
        Ok(record)
    }

    /// Remove one record; false when no record has this id
    pub fn delete(&mut self, id: Uuid) -> DbResult<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Ok(false);
        }

        save_json(&mut self.store, EXPORT_HISTORY_KEY, &self.records)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn export(name: &str) -> NewExportRecord {
        NewExportRecord {
            name: name.to_string(),
            format: ExportFormat::Zenvia,
            row_count: 3,
            theme: Some("JUNHO".to_string()),
            scheduled_for: None,
        }
    }

    #[test]
    fn test_save_assigns_id_and_time() {
        let mut history = ExportHistory::load(MemoryStore::new(), 10).unwrap();
        let before = Utc::now();
        let record = history.save(export("a.csv")).unwrap();

        assert!(record.exported_at >= before);
        assert_eq!(history.get(record.id), Some(&record));
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let mut store = MemoryStore::new();
        {
            let mut history = ExportHistory::load(&mut store, 10).unwrap();
            for name in ["a.csv", "b.csv", "c.csv"] {
                history.save(export(name)).unwrap();
            }
        }

        let history = ExportHistory::load(&mut store, 2).unwrap();
        let names: Vec<&str> = history.list().iter().map(|r| r.export.name.as_str()).collect();
        assert_eq!(names, vec!["c.csv", "b.csv"]);
    }

    #[test]
    fn test_save_drops_records_past_limit() {
        let mut store = MemoryStore::new();
        {
            let mut history = ExportHistory::load(&mut store, 2).unwrap();
            for name in ["a.csv", "b.csv", "c.csv"] {
                history.save(export(name)).unwrap();
            }
        }

        let stored: Vec<ExportRecord> = load_json(&store, EXPORT_HISTORY_KEY).unwrap().unwrap();
        let names: Vec<&str> = stored.iter().map(|r| r.export.name.as_str()).collect();
        assert_eq!(names, vec!["c.csv", "b.csv"]);
    }

    #[test]
    fn test_delete() {
        let mut history = ExportHistory::load(MemoryStore::new(), 10).unwrap();
        let kept = history.save(export("a.csv")).unwrap();
        let gone = history.save(export("b.csv")).unwrap();

        assert!(history.delete(gone.id).unwrap());
        assert!(!history.delete(gone.id).unwrap());
        assert_eq!(history.list(), [kept]);
    }

    #[test]
    fn test_record_json_shape() {
        let mut history = ExportHistory::load(MemoryStore::new(), 10).unwrap();
        let record = history.save(export("a.csv")).unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "zenvia");
        assert_eq!(value["row_count"], 3);
        assert_eq!(value["theme"], "JUNHO");
        assert!(value["id"].is_string());
    }
}
