use crate::{
    commands::{open_session, open_store, print_stats},
    config::CliConfig,
    error::{CliError, CliResult},
};
use csv_sync_csvs::find_column;
use csv_sync_sdk::{main_columns, page, sort_rows, validate_advanced, SortDirection};
use std::path::PathBuf;

pub fn execute(
    config: &CliConfig,
    file: PathBuf,
    sort_by: Option<String>,
    desc: bool,
    limit: usize,
    main_only: bool,
) -> CliResult<()> {
    let mut store = open_store(config)?;
    let session = open_session(config, &mut store, &file)?;

    println!("File: {}", session.file_name());
    print_stats(session.stats());

    let report = validate_advanced(session.original());
    if report.is_valid {
        println!("No issues found");
    } else {
        println!("Issues:");
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }

    let mut preview = if main_only {
        main_columns(session.original())
    } else {
        session.original().clone()
    };

    if let Some(column) = sort_by {
        let index = find_column(preview.headers(), &[column.to_lowercase().as_str()])
            .ok_or_else(|| CliError::InvalidArgument(format!("No column named {}", column)))?;
        let direction = if desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        preview = sort_rows(&preview, index, direction);
    }

    let rows = page(&preview, limit);
    println!();
    println!("{}", preview.headers().join(" | "));
    for row in rows {
        println!("{}", row.join(" | "));
    }
    if rows.len() < preview.row_count() {
        println!("... {} more rows", preview.row_count() - rows.len());
    }

    Ok(())
}
