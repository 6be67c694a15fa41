use crate::{
    commands::{open_session, open_store, print_stats, remember_filter, saved_filter, FilterArgs},
    config::CliConfig,
    error::CliResult,
};
use csv_sync_csvs::{serialize_table, DEFAULT_DELIMITER};
use std::path::PathBuf;
use tracing::info;

pub fn execute(
    config: &CliConfig,
    file: PathBuf,
    filters: FilterArgs,
    output: PathBuf,
) -> CliResult<()> {
    let mut store = open_store(config)?;
    let spec = filters.to_spec(&saved_filter(&mut store)?)?;
    let mut session = open_session(config, &mut store, &file)?;

    session.apply(spec.clone());
    remember_filter(&mut store, &spec)?;

    let text = serialize_table(session.filtered(), DEFAULT_DELIMITER)?;
    std::fs::write(&output, text)?;
    info!("Wrote {}", output.display());

    print_stats(session.stats());
    println!(
        "Kept {} of {} rows in {}",
        session.filtered().row_count(),
        session.original().row_count(),
        output.display()
    );
    Ok(())
}
