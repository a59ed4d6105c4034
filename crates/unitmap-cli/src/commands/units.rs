//! `units <FILE>`: list normalised units.

use anyhow::Result;
use unitmap_cli::output::{render_units_text, OutputFormat};
use unitmap_cli::terminal::ColorPalette;

use super::load_engine;
use crate::UnitsArgs;

/// Handle the `units` subcommand.
pub fn handle_units(args: &UnitsArgs, format: OutputFormat) -> Result<()> {
    let engine = load_engine(&args.file)?;

    match format {
        OutputFormat::Text => {
            print!("{}", render_units_text(&engine.markers(), &ColorPalette::detect()))
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&engine.markers())?),
    }
    Ok(())
}
