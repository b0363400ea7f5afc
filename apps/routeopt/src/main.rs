//! routeopt: plan nightly pavement-measurement routes.
//!
//! ```text
//! routeopt plan --input roads.geojson --constraints constraints.yaml \
//!               --output routes.json [--csv-dir out/]
//! ```
//!
//! Exit status is non-zero on bad input, an unbuildable routing engine, or an
//! infeasible plan; the error chain is printed to stderr.

mod cli;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ro_ingest::{load_constraints, load_segments_geojson};
use ro_output::{CsvWriter, ItineraryWriter, JsonWriter};
use ro_plan::{build_service_blocks, GreedySolver};

use cli::{Cli, Command, PlanArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Plan(args) => plan(&args),
    }
}

fn plan(args: &PlanArgs) -> Result<()> {
    let mut constraints = load_constraints(&args.constraints)
        .with_context(|| format!("loading constraints from {}", args.constraints.display()))?;
    if let Some(src) = &args.osm_source {
        constraints.osm_source = Some(src.clone());
    }

    let segments = load_segments_geojson(&args.input, constraints.oneway.default)
        .with_context(|| format!("loading segments from {}", args.input.display()))?;
    let blocks = build_service_blocks(&segments, constraints.lane_split.strategy);
    info!(segments = segments.len(), blocks = blocks.len(), "service blocks built");

    let plan = GreedySolver::new(&constraints).solve(&blocks).context("planning failed")?;
    let summary = plan.summary(&constraints);

    let mut json = JsonWriter::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    json.write_plan(&summary, &constraints)?;
    json.finish()?;

    if let Some(dir) = &args.csv_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let mut csv = CsvWriter::new(dir).with_context(|| format!("opening CSV files in {}", dir.display()))?;
        csv.write_plan(&summary, &constraints)?;
        csv.finish()?;
    }

    info!(
        nights = summary.total_nights,
        deadhead_miles = summary.total_deadhead_miles,
        service_miles = summary.total_service_miles,
        hours = summary.total_hours,
        output = %args.output.display(),
        "plan written"
    );
    Ok(())
}
