//! `highlight <FILE>`: evaluate one range query and show highlight state.

use anyhow::{Context, Result};
use unitmap_cli::output::{render_highlight_text, OutputFormat};
use unitmap_cli::terminal::ColorPalette;
use unitmap_lib::{ClassifierStrategy, QueryMode, RangeQuery};

use super::load_engine;
use crate::{HighlightArgs, ModeArg};

/// Handle the `highlight` subcommand.
pub fn handle_highlight(args: &HighlightArgs, format: OutputFormat) -> Result<()> {
    let mut engine =
        load_engine(&args.file)?.with_strategy(ClassifierStrategy::from(args.strategy));

    let query = RangeQuery {
        mode: match args.mode {
            ModeArg::Center => QueryMode::CenterRelative,
            ModeArg::Peer => QueryMode::PeerRelative,
        },
        radius_km: args.radius,
        reference_point: args.center,
    };

    engine
        .apply(query)
        .context("failed to evaluate range query")?;

    let summary = engine.summary();
    match format {
        OutputFormat::Text => print!(
            "{}",
            render_highlight_text(&summary, &ColorPalette::detect())
        ),
        OutputFormat::Json => println!("{}", summary.to_json()?),
    }
    Ok(())
}
