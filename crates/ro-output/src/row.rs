//! Flat row types shared by the output backends.
//!
//! A night flattens to alternating steps, depot to depot:
//!
//! ```text
//! deadhead, service_block, deadhead, service_block, …, deadhead
//! ```

use ro_plan::{DeadheadLeg, NightSummary, ServiceBlock};

/// Rounds to 4 decimal places; non-finite values pass through unchanged.
#[inline]
pub fn round4(x: f64) -> f64 {
    if x.is_finite() { (x * 10_000.0).round() / 10_000.0 } else { x }
}

/// Per-night totals.
#[derive(Debug, Clone, PartialEq)]
pub struct NightRow {
    pub night_index:    usize,
    pub block_count:    usize,
    pub duration_hours: f64,
    pub deadhead_miles: f64,
    pub deadhead_hours: f64,
    pub service_miles:  f64,
    pub service_hours:  f64,
    pub loopback_hours: f64,
}

impl NightRow {
    pub fn from_night(night: &NightSummary) -> Self {
        Self {
            night_index:    night.night_index,
            block_count:    night.blocks.len(),
            duration_hours: night.duration_hours,
            deadhead_miles: night.deadhead.distance_mi,
            deadhead_hours: night.deadhead.duration_h,
            service_miles:  night.service.distance_mi,
            service_hours:  night.service.duration_h,
            loopback_hours: night.loopback.duration_h,
        }
    }
}

/// What a step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Deadhead,
    ServiceBlock,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Deadhead     => "deadhead",
            StepKind::ServiceBlock => "service_block",
        }
    }
}

/// One step of a night.
///
/// Deadhead steps carry `from`/`to` stop labels and their travel time;
/// service steps carry the block's roadway, direction and passes.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub night_index:     usize,
    /// 0-based position within the night.
    pub step_index:      usize,
    pub kind:            StepKind,
    pub from:            Option<String>,
    pub to:              Option<String>,
    pub roadway_id:      Option<String>,
    pub direction:       Option<String>,
    pub azimuth_deg:     Option<f64>,
    pub passes_required: Option<u32>,
    pub speed_limit_mph: Option<f64>,
    pub distance_miles:  f64,
    pub hours:           Option<f64>,
}

impl StepRow {
    pub fn deadhead(night_index: usize, step_index: usize, leg: &DeadheadLeg) -> Self {
        Self {
            night_index,
            step_index,
            kind:            StepKind::Deadhead,
            from:            Some(leg.from.to_string()),
            to:              Some(leg.to.to_string()),
            roadway_id:      None,
            direction:       None,
            azimuth_deg:     None,
            passes_required: None,
            speed_limit_mph: None,
            distance_miles:  leg.cost.distance_mi,
            hours:           Some(leg.cost.duration_h),
        }
    }

    pub fn service(night_index: usize, step_index: usize, block: &ServiceBlock) -> Self {
        Self {
            night_index,
            step_index,
            kind:            StepKind::ServiceBlock,
            from:            None,
            to:              None,
            roadway_id:      Some(block.roadway_id.clone()),
            direction:       Some(block.direction.to_string()),
            azimuth_deg:     Some(block.azimuth_deg),
            passes_required: Some(block.passes_required),
            speed_limit_mph: Some(block.speed_limit_mph),
            distance_miles:  block.service_distance_mi,
            hours:           None,
        }
    }

    /// All steps of `night` in driving order.  An empty night has none.
    pub fn steps_for(night: &NightSummary) -> Vec<StepRow> {
        let n = night.night_index;
        let mut steps = Vec::with_capacity(night.legs.len() + night.blocks.len());
        let mut legs = night.legs.iter();

        for block in &night.blocks {
            if let Some(leg) = legs.next() {
                steps.push(Self::deadhead(n, steps.len(), leg));
            }
            steps.push(Self::service(n, steps.len(), block));
        }
        for leg in legs {
            steps.push(Self::deadhead(n, steps.len(), leg));
        }
        steps
    }
}
