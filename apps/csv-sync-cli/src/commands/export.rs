use crate::{
    commands::{open_session, open_store, remember_filter, saved_filter, FilterArgs},
    config::CliConfig,
    error::{CliError, CliResult},
};
use chrono::{Local, NaiveDateTime};
use csv_sync_db::{ExportHistory, NewExportRecord};
use csv_sync_sdk::{export_filename, part_filename, ExportFormat, ExportOptions};
use std::path::PathBuf;
use tracing::info;

const SCHEDULE_FORMAT: &str = "%d/%m/%Y %H:%M";

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &CliConfig,
    file: PathBuf,
    format: ExportFormat,
    sms_text: Option<String>,
    delimiter: Option<char>,
    scheduled_for: Option<String>,
    theme: Option<String>,
    filters: FilterArgs,
    split: Option<i64>,
    output: PathBuf,
) -> CliResult<()> {
    let generated_at = Local::now().naive_local();
    let scheduled_for = match scheduled_for {
        Some(text) => parse_schedule(&text)?,
        None => generated_at,
    };

    let options = export_options(config, format, sms_text, delimiter)?;

    let mut store = open_store(config)?;
    let spec = filters.to_spec(&saved_filter(&mut store)?)?;
    let mut session = open_session(config, &mut store, &file)?;
    session.apply(spec.clone());
    remember_filter(&mut store, &spec)?;

    let parts = session.export_parts(&options, split.unwrap_or(0))?;
    let filename = export_filename(
        &config.filename_prefix,
        format,
        scheduled_for,
        theme.as_deref(),
        generated_at,
    );

    std::fs::create_dir_all(&output)?;
    let total = parts.len();
    for (i, text) in parts.iter().enumerate() {
        let name = if total > 1 {
            part_filename(&filename, i + 1, total)
        } else {
            filename.clone()
        };
        let path = output.join(&name);
        std::fs::write(&path, text)?;
        println!("Wrote {}", path.display());
    }

    let mut history = ExportHistory::load(&mut store, config.history_limit)?;
    let record = history.save(NewExportRecord {
        name: filename,
        format,
        row_count: session.filtered().row_count(),
        theme,
        scheduled_for: Some(scheduled_for),
    })?;

    info!(
        "Exported {} rows in {} file(s), history id {}",
        session.filtered().row_count(),
        total,
        record.id
    );
    Ok(())
}

fn export_options(
    config: &CliConfig,
    format: ExportFormat,
    sms_text: Option<String>,
    delimiter: Option<char>,
) -> CliResult<ExportOptions> {
    match format {
        ExportFormat::OmniChat => Ok(ExportOptions::omnichat()),
        ExportFormat::Zenvia => {
            let delimiter = delimiter.unwrap_or(config.zenvia_delimiter);
            let delimiter = u8::try_from(delimiter).map_err(|_| {
                CliError::InvalidArgument(format!("Delimiter must be ASCII, got {:?}", delimiter))
            })?;
            let options =
                ExportOptions::zenvia(sms_text.unwrap_or_default()).with_delimiter(delimiter);
            options.validate()?;
            Ok(options)
        }
    }
}

fn parse_schedule(text: &str) -> CliResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), SCHEDULE_FORMAT).map_err(|e| {
        CliError::InvalidArgument(format!(
            "Invalid --scheduled-for '{}' (expected dd/mm/yyyy HH:MM): {}",
            text, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use csv_sync_sdk::SdkError;
    use csv_sync_testing::contacts_csv;

    #[test]
    fn test_parse_schedule() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(parse_schedule(" 12/06/2024 09:05 ").unwrap(), expected);
        assert!(parse_schedule("2024-06-12 09:05").is_err());
    }

    #[test]
    fn test_zenvia_options_use_config_delimiter() {
        let config = CliConfig::default();
        let options =
            export_options(&config, ExportFormat::Zenvia, Some("Oi".to_string()), None).unwrap();
        assert_eq!(options.delimiter, Some(b';'));

        let options =
            export_options(&config, ExportFormat::Zenvia, Some("Oi".to_string()), Some('|'))
                .unwrap();
        assert_eq!(options.delimiter, Some(b'|'));

        assert!(export_options(&config, ExportFormat::Zenvia, None, Some('é')).is_err());
    }

    #[test]
    fn test_blank_sms_text_fails_before_touching_state() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CliConfig {
            database_path: dir.path().join("state.db"),
            ..CliConfig::default()
        };
        let input = dir.path().join("lista.csv");
        std::fs::write(&input, contacts_csv(&[("11999990000", "promo", "Oi")])).unwrap();

        let result = execute(
            &config,
            input,
            ExportFormat::Zenvia,
            Some("   ".to_string()),
            None,
            None,
            None,
            FilterArgs::default(),
            None,
            dir.path().join("out"),
        );

        assert!(matches!(
            result,
            Err(CliError::Sdk(SdkError::InvalidOption(_)))
        ));
        assert!(!config.database_path.exists());
        assert!(!dir.path().join("out").exists());
    }
}
