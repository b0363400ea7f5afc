//! CSV itinerary backend.
//!
//! Creates two files in the configured output directory:
//! - `nights.csv`: one row per night
//! - `steps.csv`: one row per deadhead leg or service block, in driving order
//!
//! Figures are written unrounded.  Fields that do not apply to a step kind
//! are left empty.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use ro_core::PlanningConstraints;
use ro_plan::PlanSummary;

use crate::row::{NightRow, StepRow};
use crate::writer::ItineraryWriter;
use crate::OutputResult;

fn opt<T: ToString>(v: &Option<T>) -> String {
    v.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Writes itineraries to two CSV files.
pub struct CsvWriter {
    nights:   Writer<File>,
    steps:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut nights = Writer::from_path(dir.join("nights.csv"))?;
        nights.write_record([
            "night_index",
            "block_count",
            "duration_hours",
            "deadhead_miles",
            "deadhead_hours",
            "service_miles",
            "service_hours",
            "loopback_hours",
        ])?;

        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record([
            "night_index",
            "step_index",
            "type",
            "from",
            "to",
            "roadway_id",
            "direction",
            "azimuth_deg",
            "passes_required",
            "speed_limit_mph",
            "distance_miles",
            "hours",
        ])?;

        Ok(Self {
            nights,
            steps,
            finished: false,
        })
    }

    fn write_night(&mut self, row: &NightRow) -> OutputResult<()> {
        self.nights.write_record(&[
            row.night_index.to_string(),
            row.block_count.to_string(),
            row.duration_hours.to_string(),
            row.deadhead_miles.to_string(),
            row.deadhead_hours.to_string(),
            row.service_miles.to_string(),
            row.service_hours.to_string(),
            row.loopback_hours.to_string(),
        ])?;
        Ok(())
    }

    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.night_index.to_string(),
            row.step_index.to_string(),
            row.kind.as_str().to_string(),
            opt(&row.from),
            opt(&row.to),
            opt(&row.roadway_id),
            opt(&row.direction),
            opt(&row.azimuth_deg),
            opt(&row.passes_required),
            opt(&row.speed_limit_mph),
            row.distance_miles.to_string(),
            opt(&row.hours),
        ])?;
        Ok(())
    }
}

impl ItineraryWriter for CsvWriter {
    fn write_plan(&mut self, summary: &PlanSummary, _constraints: &PlanningConstraints) -> OutputResult<()> {
        for night in &summary.nights {
            self.write_night(&NightRow::from_night(night))?;
            for step in StepRow::steps_for(night) {
                self.write_step(&step)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.nights.flush()?;
        self.steps.flush()?;
        Ok(())
    }
}
