use crate::{
    commands::open_store,
    config::CliConfig,
    error::{CliError, CliResult},
};
use csv_sync_db::ExportHistory;
use uuid::Uuid;

pub fn list(config: &CliConfig) -> CliResult<()> {
    let mut store = open_store(config)?;
    let history = ExportHistory::load(&mut store, config.history_limit)?;

    if history.list().is_empty() {
        println!("No exports recorded");
        return Ok(());
    }

    for record in history.list() {
        let export = &record.export;
        println!(
            "{}  {}  {:<8}  {:>6} rows  {}",
            record.id,
            record.exported_at.format("%d/%m/%Y %H:%M"),
            export.format.to_string(),
            export.row_count,
            export.name
        );
    }
    Ok(())
}

pub fn delete(config: &CliConfig, id: String) -> CliResult<()> {
    let id = Uuid::parse_str(&id)
        .map_err(|e| CliError::InvalidArgument(format!("Invalid export id '{}': {}", id, e)))?;

    let mut store = open_store(config)?;
    let mut history = ExportHistory::load(&mut store, config.history_limit)?;

    if history.delete(id)? {
        println!("Deleted export {}", id);
        Ok(())
    } else {
        Err(CliError::InvalidArgument(format!("No export with id {}", id)))
    }
}
