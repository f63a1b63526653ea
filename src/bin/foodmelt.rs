//! foodmelt: Trim a FoodData Central export and load it into SQLite
//!
//! Usage:
//!   # Read original-food.json, write food.json and food.db in the current directory
//!   foodmelt
//!
//!   # Explicit paths
//!   foodmelt --input FoodData_Central_foundation_food_json.json --db nutrients.db
//!
//! Set RUST_LOG (e.g. RUST_LOG=debug) to change log verbosity.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Result};
use clap::Parser;
use foodmelt::PrepConfig;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "foodmelt")]
#[command(about = "Trim a FoodData Central export and load it into SQLite", long_about = None)]
struct Args {
    /// Input export (default: original-food.json)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Trimmed JSON output (default: food.json)
    #[arg(long, value_name = "FILE")]
    json_out: Option<PathBuf>,

    /// SQLite database (default: food.db)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Top-level key holding the food list (default: FoundationFoods)
    #[arg(long, value_name = "KEY")]
    list_key: Option<String>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env).init();

    let args = Args::parse();

    // Build config
    let mut config = PrepConfig::default();
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(json_out) = args.json_out {
        config.json_output_path = json_out;
    }
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(key) = args.list_key {
        config.food_list_key = key;
    }

    let report = foodmelt::run(&config)?;

    if !report.is_clean() {
        for failure in &report.failures {
            error!(id = failure.id, "insert failed: {}", failure.message);
        }
        bail!(
            "{} of {} food rows failed to insert",
            report.failures.len(),
            report.inserted + report.failures.len()
        );
    }

    Ok(())
}
