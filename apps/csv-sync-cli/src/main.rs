use clap::{Parser, Subcommand};
use csv_sync_sdk::DEFAULT_PAGE_SIZE;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::{FilterArgs, FormatArg};
use config::CliConfig;
use error::CliResult;

#[derive(Parser)]
#[command(name = "csv-sync")]
#[command(about = "CSV Sync - clean up contact lists and export them for OmniChat or Zenvia")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics, advisory issues and a preview of a contact list
    Inspect {
        /// Contact list CSV
        file: PathBuf,

        /// Sort the preview by this column
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Number of preview rows
        #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,

        /// Preview only the phone, template and message columns
        #[arg(long)]
        main_only: bool,
    },

    /// Apply filters and write the remaining rows as CSV
    Filter {
        /// Contact list CSV
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export a contact list in a messaging platform's layout
    Export {
        /// Contact list CSV
        file: PathBuf,

        /// Target platform
        #[arg(short, long, value_enum)]
        format: FormatArg,

        /// Message sent to every number (Zenvia only)
        #[arg(long)]
        sms_text: Option<String>,

        /// Field separator (Zenvia only)
        #[arg(long)]
        delimiter: Option<char>,

        /// When the campaign goes out, as "dd/mm/yyyy HH:MM"
        #[arg(long)]
        scheduled_for: Option<String>,

        /// Campaign theme added to the file name
        #[arg(long)]
        theme: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum rows per exported file
        #[arg(long)]
        split: Option<i64>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// List or delete recorded exports
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// List recently loaded files
    Recent,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Show recorded exports, newest first
    List,

    /// Delete one recorded export
    Delete {
        /// Export record id
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect {
            file,
            sort_by,
            desc,
            limit,
            main_only,
        } => commands::inspect::execute(&config, file, sort_by, desc, limit, main_only),
        Commands::Filter {
            file,
            filters,
            output,
        } => commands::filter::execute(&config, file, filters, output),
        Commands::Export {
            file,
            format,
            sms_text,
            delimiter,
            scheduled_for,
            theme,
            filters,
            split,
            output,
        } => commands::export::execute(
            &config,
            file,
            format.into(),
            sms_text,
            delimiter,
            scheduled_for,
            theme,
            filters,
            split,
            output,
        ),
        Commands::History { action } => match action {
            HistoryAction::List => commands::history::list(&config),
            HistoryAction::Delete { id } => commands::history::delete(&config, id),
        },
        Commands::Recent => commands::recent::execute(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_limit_defaults_to_page_size() {
        let cli = Cli::try_parse_from(["csv-sync", "inspect", "lista.csv"]).unwrap();
        match cli.command {
            Commands::Inspect { limit, .. } => assert_eq!(limit, DEFAULT_PAGE_SIZE),
            _ => panic!("expected inspect"),
        }
    }
}
