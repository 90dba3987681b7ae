//! Collect command

use super::{DEFAULT_DB, DEFAULT_REPO};
use clap::Args;
use hubtrend_core::collect::{parse_listing, RegistryItem};
use hubtrend_core::timestamp::{parse_utc, to_display};
use hubtrend_engine::commands::collect_snapshot;
use std::path::Path;

#[derive(Debug, Args)]
pub struct CollectArgs {
    #[arg(long, default_value = DEFAULT_REPO)]
    pub repo: String,

    #[arg(long, default_value = DEFAULT_DB)]
    pub db: String,

    /// JSON array of model entries as listed by the registry
    #[arg(long)]
    pub models: Option<String>,

    /// JSON array of dataset entries as listed by the registry
    #[arg(long)]
    pub datasets: Option<String>,

    /// Generation timestamp (defaults to now)
    #[arg(long)]
    pub collected_at: Option<String>,
}

fn read_listing(path: Option<&str>) -> Result<Vec<RegistryItem>, Box<dyn std::error::Error>> {
    match path {
        None => Ok(Vec::new()),
        Some(path) => {
            let raw = std::fs::read_to_string(Path::new(path))
                .map_err(|e| format!("Cannot read {}: {}", path, e))?;
            Ok(parse_listing(&raw)?)
        }
    }
}

pub fn execute(args: CollectArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.models.is_none() && args.datasets.is_none() {
        return Err("Must specify --models and/or --datasets".into());
    }

    let collected_at = match args.collected_at.as_deref() {
        None => chrono::Utc::now(),
        Some(raw) => parse_utc(raw).ok_or_else(|| format!("Invalid --collected-at: {}", raw))?,
    };

    let models = read_listing(args.models.as_deref())?;
    let datasets = read_listing(args.datasets.as_deref())?;

    let mut conn = hubtrend_store::db::open_store(&args.db)?;
    let receipt = collect_snapshot(&mut conn, &args.repo, models, datasets, collected_at)?;

    println!(
        "Collected {} models and {} datasets for {} at {}",
        receipt.models_written,
        receipt.datasets_written,
        receipt.repo_id,
        to_display(&receipt.collected_at)
    );

    Ok(())
}
