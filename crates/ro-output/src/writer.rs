//! The `ItineraryWriter` trait implemented by all backend writers.

use ro_core::PlanningConstraints;
use ro_plan::PlanSummary;

use crate::OutputResult;

/// Trait implemented by the JSON and CSV writers.
pub trait ItineraryWriter {
    /// Write every night of `summary`.  `constraints` are the ones the plan
    /// was solved under.
    fn write_plan(&mut self, summary: &PlanSummary, constraints: &PlanningConstraints) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
