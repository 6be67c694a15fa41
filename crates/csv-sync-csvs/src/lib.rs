/*!
# CSV Sync Table Model & Codec

This crate owns the **tabular data contract** shared by every CSV Sync stage:

- **Upload** (producer) → raw text parsed into a [`Table`]
- **Filter engine / exporter** (consumers) → read cells by resolved [`ColumnRoles`]
- **Splitter** → partitions a table into smaller tables with identical headers

## Tables

A [`Table`] holds the header row, data rows, the source text and a cached row
count. Tables are immutable; every transformation derives a new one.

## Export Schemas

### OmniChat (`fullNumber`)
One column with the normalized phone number, always comma-delimited.

### Zenvia (`celular`, `sms`)
Normalized phone plus a fixed SMS text; delimiter chosen by the caller.

## Usage

```rust
use csv_sync_csvs::{parse, serialize_table, split, ColumnRoles, CsvResult};

fn example() -> CsvResult<()> {
    let table = parse("phone,template_title,reply_message_text\n11999990000,promo,Oi\n")?;
    let roles = ColumnRoles::resolve(table.headers());
    assert_eq!(roles.phone, Some(0));

    let parts = split(&table, 500);
    let text = serialize_table(&parts[0], b';')?;
    assert!(text.starts_with("phone;"));
    Ok(())
}
```
*/

pub mod codec;
pub mod columns;
pub mod errors;
pub mod files;
pub mod schemas;
pub mod split;
pub mod table;

// Re-export main types for convenience
pub use codec::{
    check_delimiter, parse, parse_with_delimiter, serialize, serialize_table, DEFAULT_DELIMITER,
};
pub use columns::{find_column, ColumnRole, ColumnRoles, REQUIRED_HEADERS};
pub use errors::{CsvError, CsvResult};
pub use files::{read_csv_file, SourceFile};
pub use schemas::{
    write_omnichat_csv, write_zenvia_csv, OmniChatRow, ZenviaRow, OMNICHAT_CSV_HEADERS,
    OMNICHAT_DELIMITER, ZENVIA_CSV_HEADERS, ZENVIA_DEFAULT_DELIMITER,
};
pub use split::split;
pub use table::{cell, Table};
