use csv_sync_db::{
    ExportHistory, NewExportRecord, RecentFile, RecentFiles, SettingsStore, SqliteStore,
    UserSettings,
};
use csv_sync_sdk::{ExportFormat, TextFilter};
use csv_sync_testing::campaign_table;
use tempfile::TempDir;

/// Recent files, history and settings share one database file and survive a reopen
#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("csv-sync.db");

    let record_id = {
        let mut store = SqliteStore::open_or_create(&path).unwrap();

        let mut recent = RecentFiles::load(&mut store, 5).unwrap();
        recent
            .record(RecentFile::from_table("campanha.csv", &campaign_table(), 321))
            .unwrap();

        let mut history = ExportHistory::load(&mut store, 100).unwrap();
        let record = history
            .save(NewExportRecord {
                name: "CSV_OMNICHAT_DISPARO.csv".to_string(),
                format: ExportFormat::OmniChat,
                row_count: 6,
                theme: None,
                scheduled_for: None,
            })
            .unwrap();

        let mut settings = SettingsStore::new(&mut store);
        let mut prefs = UserSettings::default();
        prefs.last_filter.templates = TextFilter::WithContent;
        settings.save(&prefs).unwrap();

        record.id
    };

    let mut store = SqliteStore::open(&path).unwrap();

    let recent = RecentFiles::load(&mut store, 5).unwrap();
    assert_eq!(recent.files().len(), 1);
    assert_eq!(recent.files()[0].rows, 6);
    assert_eq!(recent.files()[0].size_bytes, 321);

    let mut history = ExportHistory::load(&mut store, 100).unwrap();
    assert_eq!(history.list().len(), 1);
    assert_eq!(history.list()[0].export.format, ExportFormat::OmniChat);
    assert!(history.delete(record_id).unwrap());

    let prefs = SettingsStore::new(&mut store).load().unwrap();
    assert_eq!(prefs.last_filter.templates, TextFilter::WithContent);
}
