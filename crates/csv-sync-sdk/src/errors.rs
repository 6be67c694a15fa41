use csv_sync_csvs::{ColumnRole, CsvError, REQUIRED_HEADERS};
use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Missing column: no {0} column found")]
    MissingColumn(ColumnRole),

    #[error("CSV must contain required columns: {}", REQUIRED_HEADERS.join(", "))]
    MissingRequiredColumns,

    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("Invalid export option: {0}")]
    InvalidOption(String),
}
