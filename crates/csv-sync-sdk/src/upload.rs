use crate::{
    errors::{SdkError, SdkResult},
    validator::validate_structure,
};
use csv_sync_csvs::{parse, Table};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 50 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

pub const DEFAULT_UPLOAD_EXTENSION: &str = ".csv";

/// What an upload must look like before it is parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub extension: String,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            extension: DEFAULT_UPLOAD_EXTENSION.to_string(),
        }
    }
}

impl UploadPolicy {
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }
}

/// File type and size check, before any text is read
pub fn check_upload(file_name: &str, size_bytes: u64, policy: &UploadPolicy) -> SdkResult<()> {
    let extension = policy.extension.to_lowercase();
    if !file_name.to_lowercase().ends_with(&extension) {
        return Err(SdkError::UploadRejected(format!(
            "{file_name} is not a {extension} file"
        )));
    }

    if size_bytes > policy.max_bytes {
        return Err(SdkError::UploadRejected(format!(
            "{file_name} is {size_bytes} bytes, the limit is {} bytes",
            policy.max_bytes
        )));
    }

    Ok(())
}

/// Policy check, parse and structural gate for one uploaded file
pub fn ingest(file_name: &str, text: &str, policy: &UploadPolicy) -> SdkResult<Table> {
    check_upload(file_name, text.len() as u64, policy)?;

    let table = parse(text)?;
    if !validate_structure(&table) {
        warn!("Rejected {}: required columns missing", file_name);
        return Err(SdkError::MissingRequiredColumns);
    }

    info!("Loaded {} with {} rows", file_name, table.row_count());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_sync_csvs::CsvError;
    use csv_sync_testing::contacts_csv;

    #[test]
    fn test_check_upload_extension() {
        let policy = UploadPolicy::default();
        assert!(check_upload("lista.CSV", 10, &policy).is_ok());
        assert!(matches!(
            check_upload("lista.xlsx", 10, &policy),
            Err(SdkError::UploadRejected(_))
        ));
    }

    #[test]
    fn test_check_upload_size() {
        let policy = UploadPolicy::default();
        assert!(check_upload("a.csv", DEFAULT_MAX_UPLOAD_BYTES, &policy).is_ok());
        assert!(check_upload("a.csv", DEFAULT_MAX_UPLOAD_BYTES + 1, &policy).is_err());

        let tight = UploadPolicy::with_max_bytes(4);
        assert!(check_upload("a.csv", 5, &tight).is_err());
    }

    #[test]
    fn test_ingest_accepts_contact_list() {
        let text = contacts_csv(&[("11999990000", "promo", "Oi")]);
        let table = ingest("lista.csv", &text, &UploadPolicy::default()).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.raw_text(), text);
    }

    #[test]
    fn test_ingest_rejects_missing_columns() {
        let err = ingest("lista.csv", "phone,message\n1,a\n", &UploadPolicy::default())
            .unwrap_err();
        assert!(matches!(err, SdkError::MissingRequiredColumns));
        assert_eq!(
            err.to_string(),
            "CSV must contain required columns: phone, template_title, reply_message_text"
        );
    }

    #[test]
    fn test_ingest_rejects_empty_text() {
        let err = ingest("lista.csv", "\n  \n", &UploadPolicy::default()).unwrap_err();
        assert!(matches!(err, SdkError::Csv(CsvError::Empty)));
    }

    #[test]
    fn test_ingest_measures_utf8_bytes() {
        let text = contacts_csv(&[("11999990000", "promo", "Olá")]);
        let policy = UploadPolicy::with_max_bytes(text.len() as u64 - 1);
        assert!(matches!(
            ingest("lista.csv", &text, &policy),
            Err(SdkError::UploadRejected(_))
        ));
    }
}
