// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. The main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod distance;
pub mod highlight;
pub mod units;

use std::path::Path;

use anyhow::{Context, Result};
use unitmap_lib::{read_unit_records, EngineConfig, HighlightEngine};

/// Read, normalise and install a unit document into a fresh engine.
pub fn load_engine(path: &Path) -> Result<HighlightEngine> {
    let records = read_unit_records(path)
        .with_context(|| format!("failed to read unit document {}", path.display()))?;

    let mut engine = HighlightEngine::new(EngineConfig::from_env());
    engine
        .load(&records)
        .with_context(|| format!("failed to load units from {}", path.display()))?;
    Ok(engine)
}
