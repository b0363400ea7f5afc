//! JSON itinerary backend.
//!
//! Writes one document per plan:
//!
//! ```json
//! {
//!   "meta": {
//!     "routing_engine": "direct_line",
//!     "total_nights": 2,
//!     "total_deadhead_miles": 12.3456,
//!     "total_service_miles": 40.1,
//!     "constraints": { "max_hours_per_night": 4.0, "max_nights": 200 }
//!   },
//!   "routes": [
//!     { "night_index": 1, "duration_hours": 3.91, "deadhead_miles": 6.2,
//!       "steps": [ { "type": "deadhead", "from": "Depot", "to": "R1:A:start", … },
//!                  { "type": "service_block", "roadway_id": "R1", "direction": "A", … },
//!                  … ] }
//!   ]
//! }
//! ```
//!
//! Mile and hour figures are rounded to 4 decimals.  An unreachable leg's
//! distance is written as `null`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use ro_core::PlanningConstraints;
use ro_plan::PlanSummary;

use crate::row::{round4, StepKind, StepRow};
use crate::writer::ItineraryWriter;
use crate::OutputResult;

// ── Document ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonReport {
    pub meta:   ReportMeta,
    pub routes: Vec<RouteEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    pub routing_engine:       String,
    pub total_nights:         usize,
    pub total_deadhead_miles: f64,
    pub total_service_miles:  f64,
    pub constraints:          ConstraintEcho,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintEcho {
    pub max_hours_per_night: f64,
    pub max_nights:          u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    pub night_index:    usize,
    pub duration_hours: f64,
    pub deadhead_miles: f64,
    pub steps:          Vec<StepEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEntry {
    Deadhead {
        from:           String,
        to:             String,
        distance_miles: Option<f64>,
        duration_hours: Option<f64>,
    },
    ServiceBlock {
        roadway_id:             String,
        direction:              String,
        azimuth_deg:            f64,
        passes_required:        u32,
        service_distance_miles: f64,
        speed_limit_mph:        f64,
    },
}

fn finite4(x: f64) -> Option<f64> {
    x.is_finite().then(|| round4(x))
}

impl StepEntry {
    fn from_row(row: StepRow) -> Self {
        match row.kind {
            StepKind::Deadhead => StepEntry::Deadhead {
                from:           row.from.unwrap_or_default(),
                to:             row.to.unwrap_or_default(),
                distance_miles: finite4(row.distance_miles),
                duration_hours: row.hours.and_then(finite4),
            },
            StepKind::ServiceBlock => StepEntry::ServiceBlock {
                roadway_id:             row.roadway_id.unwrap_or_default(),
                direction:              row.direction.unwrap_or_default(),
                azimuth_deg:            row.azimuth_deg.unwrap_or_default(),
                passes_required:        row.passes_required.unwrap_or_default(),
                service_distance_miles: row.distance_miles,
                speed_limit_mph:        row.speed_limit_mph.unwrap_or_default(),
            },
        }
    }
}

impl JsonReport {
    pub fn from_summary(summary: &PlanSummary, constraints: &PlanningConstraints) -> Self {
        let routes = summary
            .nights
            .iter()
            .map(|night| RouteEntry {
                night_index:    night.night_index,
                duration_hours: round4(night.duration_hours),
                deadhead_miles: round4(night.deadhead.distance_mi),
                steps:          StepRow::steps_for(night).into_iter().map(StepEntry::from_row).collect(),
            })
            .collect();

        Self {
            meta: ReportMeta {
                routing_engine:       summary.engine.clone(),
                total_nights:         summary.total_nights,
                total_deadhead_miles: round4(summary.total_deadhead_miles),
                total_service_miles:  round4(summary.total_service_miles),
                constraints:          ConstraintEcho {
                    max_hours_per_night: constraints.limits.max_hours_per_night,
                    max_nights:          constraints.limits.max_nights,
                },
            },
            routes,
        }
    }
}

// ── Writer ────────────────────────────────────────────────────────────────────

/// Writes the plan as one pretty-printed JSON document.
pub struct JsonWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl JsonWriter<BufWriter<File>> {
    /// Create (or truncate) the report file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ItineraryWriter for JsonWriter<W> {
    fn write_plan(&mut self, summary: &PlanSummary, constraints: &PlanningConstraints) -> OutputResult<()> {
        let report = JsonReport::from_summary(summary, constraints);
        serde_json::to_writer_pretty(&mut self.out, &report)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
