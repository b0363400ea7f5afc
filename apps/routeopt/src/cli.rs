//! CLI argument parsing for the routeopt binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "routeopt", version, about = "Plan nightly pavement-measurement routes")]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).  RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate nightly measurement routes
    Plan(PlanArgs),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Input GeoJSON FeatureCollection of road segments
    #[arg(long)]
    pub input: PathBuf,

    /// Constraints file: YAML (.yaml/.yml) or JSON
    #[arg(long)]
    pub constraints: PathBuf,

    /// Output routes JSON
    #[arg(long, default_value = "routes.json")]
    pub output: PathBuf,

    /// Also write nights.csv and steps.csv into this directory
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// OSM PBF extract for the network engine; overrides `osm_source`
    #[arg(long)]
    pub osm_source: Option<PathBuf>,
}

impl Cli {
    /// Default filter directive for the requested verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
