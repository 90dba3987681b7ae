//! hubtrend CLI
//!
//! Command-line interface for recording registry snapshots and discovering
//! newly trending models and datasets

use clap::{Parser, Subcommand, ValueEnum};
use hubtrend_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "hubtrend")]
#[command(about = "hubtrend - newly trending models and datasets", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report items that first appeared within the window
    Discover(commands::discover::DiscoverArgs),
    /// Record one collection run from registry listings
    Collect(commands::collect::CollectArgs),
    /// List stored generations
    History(commands::history::HistoryArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Discover(args) => commands::discover::execute(args),
        Commands::Collect(args) => commands::collect::execute(args),
        Commands::History(args) => commands::history::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
