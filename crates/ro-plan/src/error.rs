use thiserror::Error;

use ro_core::CoreError;
use ro_spatial::SpatialError;

use crate::blocks::Direction;

/// Terminal failures of a solve.  Nothing partial is returned alongside.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(
        "service block {roadway_id}:{direction} cannot fit in a night \
         (hours={hours:.3} > {max_hours}); consider splitting geometry or adjusting constraints"
    )]
    BlockExceedsNight {
        roadway_id: String,
        direction:  Direction,
        hours:      f64,
        max_hours:  f64,
    },

    #[error("cannot schedule within max_nights={max_nights}: block {roadway_id}:{direction} needs another night")]
    NightLimitExceeded {
        max_nights: u32,
        roadway_id: String,
        direction:  Direction,
    },

    #[error("invalid planning input: {0}")]
    Input(#[from] CoreError),

    #[error("routing engine construction failed: {0}")]
    Engine(#[from] SpatialError),
}

impl PlanError {
    /// `true` for the two infeasibility outcomes (as opposed to bad input or
    /// an unbuildable engine).
    pub fn is_infeasible(&self) -> bool {
        matches!(self, PlanError::BlockExceedsNight { .. } | PlanError::NightLimitExceeded { .. })
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
