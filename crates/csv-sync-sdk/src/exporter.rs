/*!
# Platform Export

Projects a table onto one of the two downstream import layouts. Only the
phone column is read; every exported number is normalized.
*/

use crate::{
    errors::{SdkError, SdkResult},
    phone::normalize,
    sms::{sms_length_status, SmsLength},
};
use csv_sync_csvs::{
    cell, check_delimiter, split, write_omnichat_csv, write_zenvia_csv, ColumnRole, ColumnRoles, OmniChatRow,
    Table, ZenviaRow, ZENVIA_DEFAULT_DELIMITER,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Target platform of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Single `fullNumber` column, comma-delimited
    OmniChat,
    /// `celular` and `sms` columns, caller-chosen delimiter
    Zenvia,
}

impl ExportFormat {
    /// Channel name used in generated file names
    pub fn channel(self) -> &'static str {
        match self {
            ExportFormat::OmniChat => "OMNICHAT",
            ExportFormat::Zenvia => "ZENVIA",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::OmniChat => f.write_str("omnichat"),
            ExportFormat::Zenvia => f.write_str("zenvia"),
        }
    }
}

/// What to export and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Text repeated on every Zenvia row; ignored for OmniChat
    pub sms_text: String,
    /// Zenvia delimiter, `;` when unset; OmniChat is always `,`
    pub delimiter: Option<u8>,
}

impl ExportOptions {
    pub fn omnichat() -> Self {
        Self {
            format: ExportFormat::OmniChat,
            sms_text: String::new(),
            delimiter: None,
        }
    }

    pub fn zenvia(sms_text: impl Into<String>) -> Self {
        Self {
            format: ExportFormat::Zenvia,
            sms_text: sms_text.into(),
            delimiter: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Reject options no table could be exported with: a Zenvia export
    /// without SMS text or with an unusable delimiter
    pub fn validate(&self) -> SdkResult<()> {
        if self.format == ExportFormat::Zenvia && self.sms_text.trim().is_empty() {
            return Err(SdkError::InvalidOption(
                "Zenvia export requires SMS text".to_string(),
            ));
        }
        if let (ExportFormat::Zenvia, Some(delimiter)) = (self.format, self.delimiter) {
            check_delimiter(delimiter)?;
        }
        Ok(())
    }
}

/// Serialize `table` in the requested platform layout
///
/// Fails with [`SdkError::MissingColumn`] when no phone column can be located,
/// and with [`SdkError::InvalidOption`] for a Zenvia export without SMS text.
pub fn export(table: &Table, options: &ExportOptions) -> SdkResult<String> {
    options.validate()?;
    warn_sms_length(options);
    write_export(table, options)
}

/// Split `table` into parts of at most `max_rows_per_part` and export each
pub fn export_parts(
    table: &Table,
    options: &ExportOptions,
    max_rows_per_part: i64,
) -> SdkResult<Vec<String>> {
    options.validate()?;
    warn_sms_length(options);

    split(table, max_rows_per_part)
        .iter()
        .map(|part| write_export(part, options))
        .collect()
}

fn write_export(table: &Table, options: &ExportOptions) -> SdkResult<String> {
    let phone_col = ColumnRoles::resolve(table.headers())
        .phone
        .ok_or(SdkError::MissingColumn(ColumnRole::Phone))?;

    let phones = table.rows().iter().map(|row| normalize(cell(row, phone_col)));

    let text = match options.format {
        ExportFormat::OmniChat => {
            let rows: Vec<OmniChatRow> = phones
                .map(|full_number| OmniChatRow { full_number })
                .collect();
            write_omnichat_csv(&rows)?
        }
        ExportFormat::Zenvia => {
            let rows: Vec<ZenviaRow> = phones
                .map(|celular| ZenviaRow {
                    celular,
                    sms: options.sms_text.clone(),
                })
                .collect();
            write_zenvia_csv(&rows, options.delimiter.unwrap_or(ZENVIA_DEFAULT_DELIMITER))?
        }
    };

    info!(format = %options.format, rows = table.row_count(), "exported table");
    Ok(text)
}

fn warn_sms_length(options: &ExportOptions) {
    if options.format != ExportFormat::Zenvia {
        return;
    }

    match sms_length_status(&options.sms_text) {
        SmsLength::Ok => {}
        SmsLength::NearLimit => warn!("SMS text is close to the single-segment limit"),
        SmsLength::OverLimit => warn!("SMS text exceeds the single-segment limit"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_sync_testing::{contacts_table, raw_table};

    fn three_rows() -> Table {
        raw_table(
            &["id", "Phone Number", "notes"],
            &[
                &["1", "(11) 98765-4321", "x"],
                &["2", "011988887777", ""],
                &["3", "5521977776666", "z"],
            ],
        )
    }

    #[test]
    fn test_omnichat_projection() {
        let text = export(&three_rows(), &ExportOptions::omnichat()).unwrap();
        assert_eq!(
            text,
            "fullNumber\n5511987654321\n5511988887777\n5521977776666"
        );
    }

    #[test]
    fn test_omnichat_row_without_phone_stays_in_place() {
        let table = contacts_table(&[
            ("11999990000", "t", "m"),
            ("", "t", "m"),
            ("11999990001", "t", "m"),
        ]);
        let text = export(&table, &ExportOptions::omnichat()).unwrap();

        assert_eq!(text, "fullNumber\n5511999990000\n\n5511999990001");
    }

    #[test]
    fn test_omnichat_ignores_delimiter() {
        let text = export(&three_rows(), &ExportOptions::omnichat().with_delimiter(b';')).unwrap();
        assert!(text.starts_with("fullNumber\n"));
    }

    #[test]
    fn test_zenvia_projection() {
        let text = export(&three_rows(), &ExportOptions::zenvia("Oi")).unwrap();
        assert_eq!(
            text,
            "celular;sms\n5511987654321;Oi\n5511988887777;Oi\n5521977776666;Oi"
        );
    }

    #[test]
    fn test_zenvia_custom_delimiter() {
        let table = contacts_table(&[("11999990000", "t", "m")]);
        let text = export(&table, &ExportOptions::zenvia("Oi, tudo bem?").with_delimiter(b',')).unwrap();
        assert_eq!(text, "celular,sms\n5511999990000,\"Oi, tudo bem?\"");
    }

    #[test]
    fn test_zenvia_requires_text() {
        let table = contacts_table(&[("11999990000", "t", "m")]);
        let result = export(&table, &ExportOptions::zenvia("   "));
        assert!(matches!(result, Err(SdkError::InvalidOption(_))));
    }

    #[test]
    fn test_validate_checks_options_without_a_table() {
        assert!(ExportOptions::omnichat().validate().is_ok());
        assert!(ExportOptions::zenvia("Oi").validate().is_ok());
        assert!(matches!(
            ExportOptions::zenvia(" ").validate(),
            Err(SdkError::InvalidOption(_))
        ));
        assert!(matches!(
            ExportOptions::zenvia("Oi").with_delimiter(b'"').validate(),
            Err(SdkError::Csv(_))
        ));
    }

    #[test]
    fn test_long_sms_is_not_blocked() {
        let table = contacts_table(&[("11999990000", "t", "m")]);
        let text = export(&table, &ExportOptions::zenvia("a".repeat(300))).unwrap();
        assert!(text.ends_with(&"a".repeat(300)));
    }

    #[test]
    fn test_missing_phone_column() {
        let table = raw_table(&["name", "message"], &[&["Ana", "Oi"]]);
        let result = export(&table, &ExportOptions::omnichat());

        assert!(matches!(
            result,
            Err(SdkError::MissingColumn(ColumnRole::Phone))
        ));
    }

    #[test]
    fn test_export_parts() {
        let rows: Vec<(String, &str, &str)> =
            (0..5).map(|i| (format!("1199999000{i}"), "t", "m")).collect();
        let refs: Vec<(&str, &str, &str)> = rows.iter().map(|(p, t, m)| (p.as_str(), *t, *m)).collect();
        let table = contacts_table(&refs);

        let parts = export_parts(&table, &ExportOptions::omnichat(), 2).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "fullNumber\n5511999990000\n5511999990001");
        assert_eq!(parts[2], "fullNumber\n5511999990004");
    }
}
