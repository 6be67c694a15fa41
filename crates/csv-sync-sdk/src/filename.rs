use crate::exporter::ExportFormat;
use chrono::NaiveDateTime;

/// Prefix used when the configured one is blank
pub const DEFAULT_FILENAME_PREFIX: &str = "CSV";

const DATE_FORMAT: &str = "%d%m%Y";
const TIME_FORMAT: &str = "%H%M";

/// Suggested download name for an export
///
/// `PREFIX_{CHANNEL}_DISPARO_{ddMMyyyy}_{HHmm}[_{THEME}]_GERADO-{ddMMyyyy}_{HHmm}.csv`,
/// where the first timestamp is when the campaign is scheduled to go out and
/// the second is when the file was generated. The theme is upper-cased with
/// inner whitespace turned into `-`, and left out when blank.
pub fn export_filename(
    prefix: &str,
    format: ExportFormat,
    scheduled_for: NaiveDateTime,
    theme: Option<&str>,
    generated_at: NaiveDateTime,
) -> String {
    let prefix = match prefix.trim() {
        "" => DEFAULT_FILENAME_PREFIX,
        p => p,
    };

    let theme = theme
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join("-").to_uppercase())
        .filter(|t| !t.is_empty())
        .map(|t| format!("_{t}"))
        .unwrap_or_default();

    format!(
        "{prefix}_{channel}_DISPARO_{scheduled_date}_{scheduled_time}{theme}_GERADO-{generated_date}_{generated_time}.csv",
        channel = format.channel(),
        scheduled_date = scheduled_for.format(DATE_FORMAT),
        scheduled_time = scheduled_for.format(TIME_FORMAT),
        generated_date = generated_at.format(DATE_FORMAT),
        generated_time = generated_at.format(TIME_FORMAT),
    )
}

/// Name for one part of a split export: `_PARTE-{n}-DE-{total}` before the extension
pub fn part_filename(filename: &str, part: usize, total: usize) -> String {
    let stem = filename.strip_suffix(".csv").unwrap_or(filename);
    format!("{stem}_PARTE-{part}-DE-{total}.csv")
}
