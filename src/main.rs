//! Satisfactory catalog extractor
//!
//! Reads the game's Docs dump and writes TypeScript item, recipe and
//! building catalogs for the planner frontend.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ficsit_extract::tables::Tables;
use ficsit_extract::{docs, emit, logging, pipeline};

const DEFAULT_DOCS_PATH: &str =
    "D:/Program Files (x86)/Steam/steamapps/common/Satisfactory/CommunityResources/Docs/en-US.json";

/// Output directory override.
const DATA_OUT_ENV_VAR: &str = "FICSIT_DATA_OUT";
const DEFAULT_DATA_OUT: &str = "src/data";

#[derive(Parser)]
#[command(name = "ficsit-extract")]
#[command(version, about = "Extract Satisfactory catalogs from the game's Docs dump")]
struct Cli {
    /// Path to the UTF-16 Docs JSON (en-US.json)
    #[arg(default_value = DEFAULT_DOCS_PATH)]
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    info!("Reading {}", cli.input.display());
    let sections = docs::load_sections(&cli.input)
        .with_context(|| format!("Failed to load Docs dump from {}", cli.input.display()))?;
    info!("Found {} native class sections", sections.len());

    let tables = Tables::default();
    let (catalog, stats) = pipeline::extract(&sections, &tables);

    let output_dir = std::env::var_os(DATA_OUT_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_OUT));
    info!("Writing TypeScript modules to {}", output_dir.display());
    emit::write_modules(&output_dir, &catalog, &tables)?;

    info!("Extraction complete\n{}", stats);
    Ok(())
}
