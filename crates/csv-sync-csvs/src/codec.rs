/*!
# CSV Codec

Text ⇄ [`Table`] conversion. Parsing is quote-aware (quoted fields may hold
the delimiter, doubled quotes and line breaks) and drops blank lines instead
of turning them into empty records. Serialization quotes only the fields that
need it, so values survive a `serialize` → `parse` round trip.
*/

use crate::{
    errors::{CsvError, CsvResult},
    table::Table,
};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::debug;

/// Delimiter used when reading uploads and when no other delimiter is requested
pub const DEFAULT_DELIMITER: u8 = b',';

/// Parse comma-separated text into a table
///
/// The first non-blank line is the header row. Fails with [`CsvError::Empty`]
/// when the text holds no non-blank line at all.
pub fn parse(text: &str) -> CsvResult<Table> {
    parse_with_delimiter(text, DEFAULT_DELIMITER)
}

/// Parse text whose fields are separated by `delimiter`, e.g. a re-read export
pub fn parse_with_delimiter(text: &str, delimiter: u8) -> CsvResult<Table> {
    check_delimiter(delimiter)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut record = StringRecord::new();
    let mut start = 0;
    while reader.read_record(&mut record)? {
        let end = reader.position().byte() as usize;
        let raw = text.get(start..end);
        start = end;

        if is_blank_line(&record, raw) {
            continue;
        }
        records.push(record.iter().map(str::to_owned).collect::<Vec<String>>());
    }

    let mut records = records.into_iter();
    let headers = records.next().ok_or(CsvError::Empty)?;
    let rows: Vec<Vec<String>> = records.collect();

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        "parsed CSV text"
    );

    Ok(Table::new(headers, rows, text.to_owned()))
}

/// Serialize a header row and data rows with the given delimiter
///
/// Cells holding the delimiter, a double quote or a line break are wrapped in
/// quotes with inner quotes doubled. Records are joined with `\n`; there is no
/// trailing line break.
pub fn serialize(headers: &[String], rows: &[Vec<String>], delimiter: u8) -> CsvResult<String> {
    let mut writer = writer_for(delimiter)?;

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    finish(writer)
}

/// Serialize a whole table, e.g. a filtered or split result
pub fn serialize_table(table: &Table, delimiter: u8) -> CsvResult<String> {
    serialize(table.headers(), table.rows(), delimiter)
}

/// Reject delimiters that would make the output ambiguous or not UTF-8
pub fn check_delimiter(delimiter: u8) -> CsvResult<()> {
    match delimiter {
        b'"' | b'\n' | b'\r' => Err(CsvError::InvalidDelimiter(delimiter as char)),
        d if !d.is_ascii() => Err(CsvError::InvalidDelimiter(d as char)),
        _ => Ok(()),
    }
}

pub(crate) fn writer_for(delimiter: u8) -> CsvResult<csv::Writer<Vec<u8>>> {
    check_delimiter(delimiter)?;

    Ok(WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new()))
}

pub(crate) fn finish(writer: csv::Writer<Vec<u8>>) -> CsvResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Io(e.into_error()))?;
    let mut text =
        String::from_utf8(bytes).map_err(|e| CsvError::InvalidEncoding(e.to_string()))?;

    if text.ends_with('\n') {
        text.pop();
    }

    Ok(text)
}

/// A line with no content: a lone empty or whitespace field that was not quoted
///
/// `raw` is the source text the record was read from; a quoted `""` is a real
/// row holding one empty cell.
fn is_blank_line(record: &StringRecord, raw: Option<&str>) -> bool {
    record.len() <= 1
        && record.iter().all(|field| field.trim().is_empty())
        && raw.map_or(true, |raw| !raw.contains('"'))
}
