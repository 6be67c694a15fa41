/*!
# CSV Sync Storage

Everything the app remembers between runs goes through one small port,
[`KeyValueStore`], holding JSON documents:

- [`RecentFiles`]: the last few uploads, most recent first
- [`ExportHistory`]: every export with its channel, row count and schedule
- [`SettingsStore`]: the user's [`UserSettings`]

[`SqliteStore`] is the on-disk backend; [`MemoryStore`] keeps state in a map.
*/

pub mod database;
pub mod errors;
pub mod export_history;
pub mod recent_files;
pub mod schema;
pub mod settings;
pub mod store;

// Re-export main types for convenience
pub use database::SqliteStore;
pub use errors::{DbError, DbResult};
pub use export_history::{ExportHistory, ExportRecord, NewExportRecord, DEFAULT_HISTORY_LIMIT};
pub use recent_files::{preview_line, RecentFile, RecentFiles, DEFAULT_RECENT_FILES_LIMIT};
pub use settings::{SettingsStore, UserSettings};
pub use store::{load_json, save_json, KeyValueStore, MemoryStore};
