/*!
# Upload Files

Reading a user-selected file from disk into text the codec can parse.
*/

use crate::errors::{CsvError, CsvResult};
use std::fs;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// A CSV file read from disk, before any policy checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name without directories, used for history and policy checks
    pub name: String,
    /// Decoded text with any UTF-8 byte-order mark removed
    pub text: String,
    /// Size on disk in bytes
    pub size_bytes: u64,
}

/// Read a file as UTF-8 text
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<SourceFile> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let size_bytes = bytes.len() as u64;

    let text = String::from_utf8(bytes).map_err(|e| {
        CsvError::InvalidEncoding(format!("{} is not valid UTF-8: {}", path.display(), e))
    })?;
    let text = match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_owned(),
        None => text,
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SourceFile {
        name,
        text,
        size_bytes,
    })
}
