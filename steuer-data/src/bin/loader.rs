use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Inspect a municipality Steuerfuss spreadsheet.
///
/// Reads the cantonal XLSX export (or a CSV equivalent), runs the column
/// detection heuristics, and prints the resulting municipality table.
#[derive(Parser, Debug)]
#[command(name = "gemeinde-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the spreadsheet (XLSX, XLS, or CSV)
    #[arg(short, long)]
    file: PathBuf,

    /// Look up a single municipality (case-insensitive) instead of listing all
    #[arg(short, long)]
    lookup: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let table = steuer_data::load_path(&args.file)
        .with_context(|| format!("Failed to load municipalities from: {}", args.file.display()))?;

    println!("Loaded {} municipalities.", table.len());

    match &args.lookup {
        Some(query) => {
            let (name, steuerfuss) = table.resolve(query)?;
            println!("{name}: {steuerfuss}%");
        }
        None => {
            for name in table.sorted_names() {
                if let Some(steuerfuss) = table.get(name) {
                    println!("{name}: {steuerfuss}%");
                }
            }
        }
    }

    Ok(())
}
