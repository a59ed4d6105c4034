//! `distance <FILE> <FROM> <TO>`: great-circle distance between two units.

use anyhow::Result;
use serde_json::json;
use unitmap_cli::output::{render_distance_text, OutputFormat};

use super::load_engine;
use crate::DistanceArgs;

/// Handle the `distance` subcommand.
pub fn handle_distance(args: &DistanceArgs, format: OutputFormat) -> Result<()> {
    let engine = load_engine(&args.file)?;
    let distance_km = engine.distance_between(&args.from, &args.to)?;

    match format {
        OutputFormat::Text => print!("{}", render_distance_text(&args.from, &args.to, distance_km)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "from": args.from,
                "to": args.to,
                "distance_km": distance_km,
            }))?
        ),
    }
    Ok(())
}
