use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CSV: input contains no non-empty lines")]
    Empty,

    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(char),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}
