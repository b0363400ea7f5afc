//! Cost estimation: deadhead travel, service traversal, repeat-pass loopback.
//!
//! Every function here is pure over `(constraints, engine, blocks)`; the only
//! state touched is the engine's internal memoisation.
//!
//! A night's deadhead chain is:
//!
//! ```text
//! depot → b0.start   b0.end → b1.start   …   bN.end → depot
//! ```

use std::fmt;

use ro_core::{DistanceTime, GeoPoint, LoopbackMode, PlanningConstraints};
use ro_spatial::RoutingEngine;

use crate::blocks::{Direction, ServiceBlock};

// ── Leg breakdown ─────────────────────────────────────────────────────────────

/// One end of a deadhead leg.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stop {
    Depot,
    BlockStart { roadway_id: String, direction: Direction },
    BlockEnd   { roadway_id: String, direction: Direction },
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stop::Depot => f.write_str("Depot"),
            Stop::BlockStart { roadway_id, direction } => write!(f, "{roadway_id}:{direction}:start"),
            Stop::BlockEnd { roadway_id, direction }   => write!(f, "{roadway_id}:{direction}:end"),
        }
    }
}

/// A single deadhead leg with its engine cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeadheadLeg {
    pub from: Stop,
    pub to:   Stop,
    pub cost: DistanceTime,
}

// ── CostModel ─────────────────────────────────────────────────────────────────

/// Converts engine distances and block geometry into domain costs.
///
/// Cheap to construct: it only borrows the constraints and the engine.
#[derive(Clone, Copy)]
pub struct CostModel<'a> {
    constraints: &'a PlanningConstraints,
    engine:      &'a dyn RoutingEngine,
}

impl<'a> CostModel<'a> {
    pub fn new(constraints: &'a PlanningConstraints, engine: &'a dyn RoutingEngine) -> Self {
        Self { constraints, engine }
    }

    pub fn constraints(&self) -> &'a PlanningConstraints {
        self.constraints
    }

    pub fn engine(&self) -> &'a dyn RoutingEngine {
        self.engine
    }

    /// Measuring the block once per required pass at the service speed.
    pub fn service_cost(&self, block: &ServiceBlock) -> DistanceTime {
        let mph = self.constraints.speed.effective_service_mph(block.speed_limit_mph);
        DistanceTime::new(block.service_distance_mi, block.service_distance_mi / mph)
    }

    /// Repositioning from the block's end back to its start, once per pass
    /// beyond the first.
    pub fn loopback_cost(&self, block: &ServiceBlock) -> DistanceTime {
        let extra = block.passes_required.saturating_sub(1);
        if extra == 0 {
            return DistanceTime::ZERO;
        }
        let extra = f64::from(extra);
        match self.constraints.loopback.mode {
            LoopbackMode::Constant => {
                let secs = self.constraints.loopback.constant_seconds * extra;
                DistanceTime::new(0.0, secs / 3_600.0)
            }
            LoopbackMode::Routing => self.engine.distance_time(block.end, block.start) * extra,
        }
    }

    /// Service plus loopback for one block.
    #[inline]
    pub fn block_service(&self, block: &ServiceBlock) -> DistanceTime {
        self.service_cost(block) + self.loopback_cost(block)
    }

    #[inline]
    pub fn deadhead_leg(&self, a: GeoPoint, b: GeoPoint) -> DistanceTime {
        self.engine.distance_time(a, b)
    }

    /// Total deadhead for a night visiting `blocks` in order.  Empty → zero.
    pub fn night_deadhead(&self, depot: GeoPoint, blocks: &[ServiceBlock]) -> DistanceTime {
        self.deadhead_chain(depot, blocks)
    }

    /// [`night_deadhead`](Self::night_deadhead) over any ordered sequence of
    /// borrowed blocks, so candidate orders need not be materialised.
    pub fn deadhead_chain<'b, I>(&self, depot: GeoPoint, blocks: I) -> DistanceTime
    where
        I: IntoIterator<Item = &'b ServiceBlock>,
    {
        let mut total = DistanceTime::ZERO;
        let mut here = None;
        for block in blocks {
            total += self.deadhead_leg(here.unwrap_or(depot), block.start);
            here = Some(block.end);
        }
        match here {
            Some(last_end) => total + self.deadhead_leg(last_end, depot),
            None => DistanceTime::ZERO,
        }
    }

    /// Service plus loopback summed over `blocks`.
    pub fn night_service(&self, blocks: &[ServiceBlock]) -> DistanceTime {
        blocks.iter().map(|b| self.block_service(b)).sum()
    }

    /// Deadhead duration plus service duration, in hours.
    pub fn night_total_hours(&self, depot: GeoPoint, blocks: &[ServiceBlock]) -> f64 {
        self.night_deadhead(depot, blocks).duration_h + self.night_service(blocks).duration_h
    }

    /// Every deadhead leg of the night, depot to depot.  Empty → no legs.
    pub fn night_legs(&self, depot: GeoPoint, blocks: &[ServiceBlock]) -> Vec<DeadheadLeg> {
        let Some(last) = blocks.last() else {
            return Vec::new();
        };

        let start_of = |b: &ServiceBlock| Stop::BlockStart {
            roadway_id: b.roadway_id.clone(),
            direction:  b.direction,
        };
        let end_of = |b: &ServiceBlock| Stop::BlockEnd {
            roadway_id: b.roadway_id.clone(),
            direction:  b.direction,
        };

        let mut legs = Vec::with_capacity(blocks.len() + 1);
        legs.push(DeadheadLeg {
            from: Stop::Depot,
            to:   start_of(&blocks[0]),
            cost: self.deadhead_leg(depot, blocks[0].start),
        });
        for pair in blocks.windows(2) {
            legs.push(DeadheadLeg {
                from: end_of(&pair[0]),
                to:   start_of(&pair[1]),
                cost: self.deadhead_leg(pair[0].end, pair[1].start),
            });
        }
        legs.push(DeadheadLeg {
            from: end_of(last),
            to:   Stop::Depot,
            cost: self.deadhead_leg(last.end, depot),
        });
        legs
    }
}
