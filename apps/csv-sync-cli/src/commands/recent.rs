use crate::{commands::open_store, config::CliConfig, error::CliResult};
use csv_sync_db::RecentFiles;

pub fn execute(config: &CliConfig) -> CliResult<()> {
    let mut store = open_store(config)?;
    let recent = RecentFiles::load(&mut store, config.recent_files_limit)?;

    if recent.files().is_empty() {
        println!("No recent files");
        return Ok(());
    }

    for file in recent.files() {
        println!(
            "{}  {}  {} rows  {} bytes",
            file.date.format("%d/%m/%Y %H:%M"),
            file.name,
            file.rows,
            file.size_bytes
        );
        if !file.preview.is_empty() {
            println!("    {}", file.preview);
        }
    }
    Ok(())
}
