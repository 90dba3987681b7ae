//! History command

use super::{open_existing, DEFAULT_DB, DEFAULT_REPO};
use clap::Args;
use hubtrend_core::timestamp::to_display;
use hubtrend_store::list_generations;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long, default_value = DEFAULT_REPO)]
    pub repo: String,

    #[arg(long, default_value = DEFAULT_DB)]
    pub db: String,
}

pub fn execute(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_existing(&args.db, &args.repo)?;
    let generations = list_generations(&conn, &args.repo)?;

    if generations.is_empty() {
        println!("No generations stored for {}", args.repo);
        return Ok(());
    }

    for generation in &generations {
        println!(
            "{}  {:<8}  {}",
            to_display(&generation.collected_at),
            generation.kind.as_str(),
            generation.record_count
        );
    }

    Ok(())
}
