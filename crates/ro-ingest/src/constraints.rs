//! Constraints loader (YAML or JSON).
//!
//! Every section except `depot` is optional and falls back to its default:
//!
//! ```yaml
//! depot: { name: Tampa Yard, lat: 28.0585, lon: -82.4163 }
//! limits: { max_hours_per_night: 4.0, max_nights: 200 }
//! speed: { service_factor: 1.0, deadhead_factor: 1.0, deadhead_speed_mph: 45.0 }
//! loopback: { mode: constant, constant_seconds: 60 }
//! routing_engine: euclidean   # or direct_line, osmnx, osm, network
//! ```
//!
//! The same document written as JSON is accepted too.  [`load_constraints`]
//! picks the parser from the file extension.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use ro_core::PlanningConstraints;

use crate::IngestResult;

/// Serialization of a constraints file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstraintsFormat {
    Yaml,
    Json,
}

impl ConstraintsFormat {
    /// `.yaml` / `.yml` (any case) are YAML; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load and validate constraints, choosing YAML or JSON by file extension.
pub fn load_constraints(path: &Path) -> IngestResult<PlanningConstraints> {
    match ConstraintsFormat::from_path(path) {
        ConstraintsFormat::Yaml => load_constraints_yaml(path),
        ConstraintsFormat::Json => load_constraints_json(path),
    }
}

/// Load and validate constraints from a YAML file.
pub fn load_constraints_yaml(path: &Path) -> IngestResult<PlanningConstraints> {
    let file = File::open(path)?;
    checked(serde_yaml::from_reader(BufReader::new(file))?)
}

/// Parse and validate constraints from a YAML string.
pub fn load_constraints_yaml_str(yaml: &str) -> IngestResult<PlanningConstraints> {
    checked(serde_yaml::from_str(yaml)?)
}

/// Load and validate constraints from a JSON file.
pub fn load_constraints_json(path: &Path) -> IngestResult<PlanningConstraints> {
    let file = File::open(path)?;
    checked(serde_json::from_reader(BufReader::new(file))?)
}

/// Parse and validate constraints from a JSON string.
pub fn load_constraints_str(json: &str) -> IngestResult<PlanningConstraints> {
    checked(serde_json::from_str(json)?)
}

fn checked(constraints: PlanningConstraints) -> IngestResult<PlanningConstraints> {
    constraints.validate()?;
    info!(
        depot = %constraints.depot.name,
        engine = %constraints.routing_engine,
        max_hours_per_night = constraints.limits.max_hours_per_night,
        max_nights = constraints.limits.max_nights,
        "constraints loaded"
    );
    Ok(constraints)
}
