/*!
# Export Schemas

Row layouts expected by the two downstream messaging platforms. Both are full
projections: only the phone number (and, for Zenvia, a fixed SMS text)
survive from the uploaded table.
*/

use crate::{
    codec::{finish, writer_for},
    errors::CsvResult,
};
use serde::{Deserialize, Serialize};

// ================================================================================================
// OmniChat CSV Schema
// ================================================================================================

/// Expected headers for an OmniChat import in exact order
pub const OMNICHAT_CSV_HEADERS: &[&str] = &["fullNumber"];

/// OmniChat always ingests comma-separated files
pub const OMNICHAT_DELIMITER: u8 = b',';

/// Row structure for an OmniChat contact import
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OmniChatRow {
    /// Normalized phone number, digits only with country code
    #[serde(rename = "fullNumber")]
    pub full_number: String,
}

// ================================================================================================
// Zenvia CSV Schema
// ================================================================================================

/// Expected headers for a Zenvia SMS campaign in exact order
pub const ZENVIA_CSV_HEADERS: &[&str] = &["celular", "sms"];

/// Zenvia's importer is locale sensitive; Brazilian spreadsheets use `;`
pub const ZENVIA_DEFAULT_DELIMITER: u8 = b';';

/// Row structure for a Zenvia SMS campaign
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZenviaRow {
    /// Normalized phone number
    pub celular: String,

    /// Message text, identical on every row of one export
    pub sms: String,
}

// ================================================================================================
// Writing
// ================================================================================================

/// Write OmniChat rows, header first, comma-delimited
///
/// A row without a number is written as an empty line. The csv writer would
/// quote a lone empty field as `""`, which the importer reads as a value.
pub fn write_omnichat_csv(rows: &[OmniChatRow]) -> CsvResult<String> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(write_line(OMNICHAT_CSV_HEADERS, OMNICHAT_DELIMITER)?);

    for row in rows {
        if row.full_number.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(write_line(&[row.full_number.as_str()], OMNICHAT_DELIMITER)?);
        }
    }

    Ok(lines.join("\n"))
}

/// Write Zenvia rows, header first, with the caller's delimiter
pub fn write_zenvia_csv(rows: &[ZenviaRow], delimiter: u8) -> CsvResult<String> {
    write_rows(ZENVIA_CSV_HEADERS, rows, delimiter)
}

fn write_rows<T: Serialize>(headers: &[&str], rows: &[T], delimiter: u8) -> CsvResult<String> {
    let mut wtr = writer_for(delimiter)?;

    // Header written explicitly so an empty export still carries it
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    finish(wtr)
}

fn write_line(fields: &[&str], delimiter: u8) -> CsvResult<String> {
    let mut wtr = writer_for(delimiter)?;
    wtr.write_record(fields)?;
    finish(wtr)
}
