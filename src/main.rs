mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use staycal_core::config::StaycalConfig;
use staycal_core::view::ViewMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "staycal")]
#[command(about = "View and export property availability from an iCalendar feed")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an .ics feed (file or "-" for stdin) into the local snapshot
    Import {
        /// Path to the .ics file, or "-" to read stdin
        #[arg(default_value = "-")]
        file: String,
    },
    /// List reserved ranges
    List {
        /// Read ranges from this .ics file instead of the snapshot
        #[arg(long)]
        ics: Option<PathBuf>,

        /// Print the ranges as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the availability grid
    Show {
        /// Read ranges from this .ics file instead of the snapshot
        #[arg(long)]
        ics: Option<PathBuf>,

        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// "month" or "year" (defaults to the configured view)
        #[arg(long)]
        view: Option<ViewMode>,
    },
    /// Show the status of a single day
    Status {
        /// Day to check (YYYY-MM-DD)
        date: String,

        /// Read ranges from this .ics file instead of the snapshot
        #[arg(long)]
        ics: Option<PathBuf>,
    },
    /// Block a range of nights
    Add {
        /// First night (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Last night, inclusive (YYYY-MM-DD)
        #[arg(short, long)]
        end: String,

        /// Label for the range
        #[arg(long)]
        summary: Option<String>,
    },
    /// Export the snapshot as .ics
    Export {
        /// Output file, or "-" for stdout (defaults to the configured file name)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = StaycalConfig::load()?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Import { file } => commands::import::run(&config, &file),
        Commands::List { ics, json } => commands::list::run(&config, ics.as_deref(), json),
        Commands::Show {
            ics,
            year,
            month,
            view,
        } => commands::show::run(&config, ics.as_deref(), year, month, view),
        Commands::Status { date, ics } => commands::status::run(&config, &date, ics.as_deref()),
        Commands::Add {
            start,
            end,
            summary,
        } => commands::add::run(&config, &start, &end, summary.as_deref()),
        Commands::Export { output } => commands::export::run(&config, output.as_deref()),
    }
}
