//! Discover command

use super::{open_existing, DEFAULT_DB, DEFAULT_REPO};
use clap::Args;
use hubtrend_core::model::DEFAULT_TOP_N;
use hubtrend_core::DeltaWindow;
use hubtrend_engine::commands::find_new_trending;

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Repository the snapshots are stored under
    #[arg(long, default_value = DEFAULT_REPO)]
    pub repo: String,

    #[arg(long, default_value = DEFAULT_DB)]
    pub db: String,

    /// Window length in days
    #[arg(long, default_value_t = hubtrend_core::model::DEFAULT_DAYS)]
    pub days: u32,

    /// Drop items last modified more than this many 30-day months before the
    /// latest collection (0 disables)
    #[arg(long)]
    pub max_age_months: Option<u32>,

    /// Keep only the N most downloaded items of each generation; without a
    /// value, the collector's cap of 100
    #[arg(long, value_name = "N")]
    pub top_n: Option<Option<usize>>,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DiscoverArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut window = DeltaWindow::new(args.days)?;
    if let Some(months) = args.max_age_months {
        window = window.with_max_age_months(months);
    }
    if let Some(cap) = args.top_n {
        window = window.with_top_n(cap.unwrap_or(DEFAULT_TOP_N))?;
    }

    let conn = open_existing(&args.db, &args.repo)?;
    let outcome = find_new_trending(&conn, &args.repo, &window)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", outcome.report);
    }

    Ok(())
}
