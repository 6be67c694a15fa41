use crate::{
    store::{load_json, save_json, KeyValueStore},
    DbResult,
};
use csv_sync_sdk::{FilterSpec, DEFAULT_FILENAME_PREFIX};
use serde::{Deserialize, Serialize};

pub const SETTINGS_KEY: &str = "csv-sync.settings";

/// Preferences carried between sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub last_filter: FilterSpec,
    pub preferred_delimiter: char,
    pub filename_prefix: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            last_filter: FilterSpec::default(),
            preferred_delimiter: ';',
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
        }
    }
}

pub struct SettingsStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored settings, or the defaults when nothing was saved yet
    pub fn load(&self) -> DbResult<UserSettings> {
        Ok(load_json(&self.store, SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn save(&mut self, settings: &UserSettings) -> DbResult<()> {
        save_json(&mut self.store, SETTINGS_KEY, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use csv_sync_sdk::TextFilter;

    #[test]
    fn test_defaults_when_absent() {
        let settings = SettingsStore::new(MemoryStore::new()).load().unwrap();
        assert_eq!(settings, UserSettings::default());
        assert_eq!(settings.filename_prefix, "CSV");
    }

    #[test]
    fn test_save_and_load() {
        let mut store = SettingsStore::new(MemoryStore::new());
        let mut settings = UserSettings::default();
        settings.last_filter.messages = TextFilter::Custom("oferta".into());
        settings.preferred_delimiter = ',';

        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, r#"{"filenamePrefix":"LOJA"}"#).unwrap();

        let settings = SettingsStore::new(store).load().unwrap();
        assert_eq!(settings.filename_prefix, "LOJA");
        assert_eq!(settings.preferred_delimiter, ';');
    }
}
