use crate::error::{CliError, CliResult};
use csv_sync_db::{DEFAULT_HISTORY_LIMIT, DEFAULT_RECENT_FILES_LIMIT};
use csv_sync_sdk::{UploadPolicy, DEFAULT_FILENAME_PREFIX, DEFAULT_MAX_UPLOAD_BYTES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional YAML configuration passed with `--config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// First segment of every export file name
    pub filename_prefix: String,

    /// Field separator for Zenvia exports when `--delimiter` is not given
    pub zenvia_delimiter: char,

    /// Largest accepted upload, in bytes
    pub max_upload_bytes: u64,

    /// SQLite file holding recent files, export history and settings
    pub database_path: PathBuf,

    pub recent_files_limit: usize,

    pub history_limit: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            zenvia_delimiter: ';',
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            database_path: PathBuf::from("csv-sync.db"),
            recent_files_limit: DEFAULT_RECENT_FILES_LIMIT,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl CliConfig {
    /// Read `path`, or fall back to the defaults when no file was given
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.check()?;
        Ok(config)
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::with_max_bytes(self.max_upload_bytes)
    }

    fn check(&self) -> CliResult<()> {
        if !self.zenvia_delimiter.is_ascii() || matches!(self.zenvia_delimiter, '"' | '\n' | '\r') {
            return Err(CliError::InvalidConfig(format!(
                "zenvia_delimiter cannot be {:?}",
                self.zenvia_delimiter
            )));
        }
        if self.recent_files_limit == 0 || self.history_limit == 0 {
            return Err(CliError::InvalidConfig(
                "recent_files_limit and history_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
