/*!
# CSV Sync SDK

Contact-list wrangling on top of [`csv_sync_csvs`] tables:

- **Upload gate**: [`ingest`] checks the file, parses it and enforces the
  required `phone`, `template_title`, `reply_message_text` columns
- **Analysis**: [`analyze`] and [`validate_advanced`] report counts and
  advisory issues without ever failing
- **Filtering**: [`apply_filters`] runs a declarative [`FilterSpec`] in a
  fixed order and returns the filtered table with fresh [`Stats`]
- **Export**: [`export`] projects a table into the OmniChat or Zenvia layout,
  [`export_filename`] names the download

[`Session`] ties these together for one uploaded file.

```rust
use csv_sync_sdk::{ingest, ExportOptions, FilterSpec, Session, SdkResult, UploadPolicy};

fn example(text: &str) -> SdkResult<String> {
    let table = ingest("contatos.csv", text, &UploadPolicy::default())?;
    let mut session = Session::open("contatos.csv", table);

    let mut spec = FilterSpec::default();
    spec.phone_numbers.fix_format = true;
    spec.phone_numbers.remove_duplicates = true;
    session.apply(spec);

    session.export(&ExportOptions::zenvia("Sua oferta chegou"))
}
```
*/

pub mod analyzer;
pub mod errors;
pub mod exporter;
pub mod filename;
pub mod filters;
pub mod phone;
pub mod preview;
pub mod session;
pub mod sms;
pub mod upload;
pub mod validator;

pub use analyzer::{analyze, analyze_with_roles, Stats};
pub use errors::{SdkError, SdkResult};
pub use exporter::{export, export_parts, ExportFormat, ExportOptions};
pub use filename::{export_filename, part_filename, DEFAULT_FILENAME_PREFIX};
pub use filters::{apply_filters, FilterOutcome, FilterSpec, PhoneOptions, TextFilter};
pub use phone::{is_valid, normalize};
pub use preview::{main_columns, natural_cmp, page, sort_rows, SortDirection, DEFAULT_PAGE_SIZE};
pub use session::Session;
pub use sms::{sms_length_status, SmsLength, SMS_RECOMMENDED_LIMIT, SMS_SEGMENT_LIMIT};
pub use upload::{check_upload, ingest, UploadPolicy, DEFAULT_MAX_UPLOAD_BYTES};
pub use validator::{
    missing_required_headers, validate_advanced, validate_structure, ValidationReport,
};
