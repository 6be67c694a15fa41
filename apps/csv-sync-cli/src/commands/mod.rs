pub mod export;
pub mod filter;
pub mod history;
pub mod inspect;
pub mod recent;

use crate::{
    config::CliConfig,
    error::{CliError, CliResult},
};
use clap::{Args, ValueEnum};
use csv_sync_csvs::read_csv_file;
use csv_sync_db::{RecentFile, RecentFiles, SettingsStore, SqliteStore};
use csv_sync_sdk::{ingest, ExportFormat, FilterSpec, PhoneOptions, Session, Stats, TextFilter};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Omnichat,
    Zenvia,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Omnichat => ExportFormat::OmniChat,
            FormatArg::Zenvia => ExportFormat::Zenvia,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextMode {
    All,
    Empty,
    WithContent,
    Custom,
}

/// Filter flags shared by `filter` and `export`
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Rewrite phone numbers into the normalized 55-prefixed form
    #[arg(long)]
    pub fix_format: bool,

    /// Keep only the first row for each phone number
    #[arg(long)]
    pub remove_duplicates: bool,

    /// Message filter
    #[arg(long, value_enum)]
    pub messages: Option<TextMode>,

    /// Words every kept message must contain (implies `--messages custom`)
    #[arg(long)]
    pub message_pattern: Option<String>,

    /// Template filter
    #[arg(long, value_enum)]
    pub templates: Option<TextMode>,

    /// Words every kept template must contain (implies `--templates custom`)
    #[arg(long)]
    pub template_pattern: Option<String>,

    /// Start from the filters saved by the previous run
    #[arg(long)]
    pub last_filter: bool,
}

impl FilterArgs {
    /// Build the spec; explicit flags override the saved one when `--last-filter` is set
    pub fn to_spec(&self, saved: &FilterSpec) -> CliResult<FilterSpec> {
        let base = if self.last_filter {
            saved.clone()
        } else {
            FilterSpec::default()
        };

        Ok(FilterSpec {
            phone_numbers: PhoneOptions {
                fix_format: self.fix_format || base.phone_numbers.fix_format,
                remove_duplicates: self.remove_duplicates || base.phone_numbers.remove_duplicates,
            },
            messages: text_filter(self.messages, self.message_pattern.as_deref(), "messages")?
                .unwrap_or(base.messages),
            templates: text_filter(self.templates, self.template_pattern.as_deref(), "templates")?
                .unwrap_or(base.templates),
        })
    }
}

fn text_filter(
    mode: Option<TextMode>,
    pattern: Option<&str>,
    flag: &str,
) -> CliResult<Option<TextFilter>> {
    let filter = match (mode, pattern) {
        (None, None) => return Ok(None),
        (Some(TextMode::All), None) => TextFilter::All,
        (Some(TextMode::Empty), None) => TextFilter::Empty,
        (Some(TextMode::WithContent), None) => TextFilter::WithContent,
        (Some(TextMode::Custom) | None, Some(pattern)) => TextFilter::Custom(pattern.to_string()),
        (Some(TextMode::Custom), None) => {
            return Err(CliError::InvalidArgument(format!(
                "--{flag} custom needs a pattern"
            )))
        }
        (Some(mode), Some(_)) => {
            return Err(CliError::InvalidArgument(format!(
                "a pattern only applies to --{flag} custom, not {mode:?}"
            )))
        }
    };
    Ok(Some(filter))
}

/// Read, gate and open `path`, recording it in the recent-files list
pub fn open_session(
    config: &CliConfig,
    store: &mut SqliteStore,
    path: &Path,
) -> CliResult<Session> {
    let source = read_csv_file(path)?;
    let table = ingest(&source.name, &source.text, &config.upload_policy())?;

    let mut recent = RecentFiles::load(&mut *store, config.recent_files_limit)?;
    recent.record(RecentFile::from_table(
        source.name.clone(),
        &table,
        source.size_bytes,
    ))?;

    Ok(Session::open(source.name, table))
}

pub fn open_store(config: &CliConfig) -> CliResult<SqliteStore> {
    Ok(SqliteStore::open_or_create(&config.database_path)?)
}

pub fn saved_filter(store: &mut SqliteStore) -> CliResult<FilterSpec> {
    Ok(SettingsStore::new(store).load()?.last_filter)
}

pub fn remember_filter(store: &mut SqliteStore, spec: &FilterSpec) -> CliResult<()> {
    let mut settings = SettingsStore::new(store);
    let mut current = settings.load()?;
    current.last_filter = spec.clone();
    settings.save(&current)?;
    Ok(())
}

pub fn print_stats(stats: &Stats) {
    println!("Total records: {}", stats.total_records);
    println!("Valid phone numbers: {}", stats.valid_phone_numbers);
    println!("Duplicate phone numbers: {}", stats.duplicate_phone_numbers);
    println!("Empty messages: {}", stats.empty_messages);
    if let Some(corrected) = stats.corrected_phone_numbers {
        println!("Corrected phone numbers: {}", corrected);
    }
}
