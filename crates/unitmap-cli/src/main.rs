mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use unitmap_cli::output::OutputFormat;
use unitmap_lib::{ClassifierStrategy, GeoCoordinate};

use commands::distance::handle_distance;
use commands::highlight::handle_highlight;
use commands::units::handle_units;

#[derive(Parser, Debug)]
#[command(author, version, about = "Unit map range highlighting utilities")]
struct Cli {
    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the units in a document after normalisation.
    Units(UnitsArgs),
    /// Evaluate a range query and show which units are highlighted.
    Highlight(HighlightArgs),
    /// Great-circle distance between two units, in kilometres.
    Distance(DistanceArgs),
}

#[derive(Args, Debug)]
pub struct UnitsArgs {
    /// Unit document (XML, or JSON when the extension is `.json`).
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct HighlightArgs {
    /// Unit document (XML, or JSON when the extension is `.json`).
    pub file: PathBuf,
    /// How distances are measured.
    #[arg(long, value_enum, default_value_t = ModeArg::Peer)]
    pub mode: ModeArg,
    /// Radius in kilometres. Units strictly closer than this are in range.
    #[arg(long, allow_negative_numbers = true)]
    pub radius: f64,
    /// Reference point as `LAT,LON`, required for `--mode center`.
    #[arg(long, allow_hyphen_values = true)]
    pub center: Option<GeoCoordinate>,
    /// Classification strategy; `auto` switches to the KD-tree for large batches.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,
}

#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// Unit document (XML, or JSON when the extension is `.json`).
    pub file: PathBuf,
    /// Id of the first unit.
    pub from: String,
    /// Id of the second unit.
    pub to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Distance to the `--center` reference point.
    Center,
    /// Distance to any other unit.
    Peer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Auto,
    BruteForce,
    Indexed,
}

impl From<StrategyArg> for ClassifierStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => ClassifierStrategy::Auto,
            StrategyArg::BruteForce => ClassifierStrategy::BruteForce,
            StrategyArg::Indexed => ClassifierStrategy::Indexed,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Units(args) => handle_units(args, cli.format),
        Command::Highlight(args) => handle_highlight(args, cli.format),
        Command::Distance(args) => handle_distance(args, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
