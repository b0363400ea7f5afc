//! Presentation figures for a finished plan.
//!
//! Writers in `ro-output` render these; they never re-price anything
//! themselves.  All figures come from the same [`CostModel`] (and so the same
//! engine) the solver used.

use ro_core::DistanceTime;

use crate::blocks::ServiceBlock;
use crate::cost::{CostModel, DeadheadLeg};
use crate::night::NightRoute;

/// Figures for one night.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NightSummary {
    /// 1-based, in plan order.
    pub night_index:    usize,
    /// Deadhead + service + loopback hours.
    pub duration_hours: f64,
    pub deadhead:       DistanceTime,
    /// Measuring passes only.
    pub service:        DistanceTime,
    pub loopback:       DistanceTime,
    pub legs:           Vec<DeadheadLeg>,
    pub blocks:         Vec<ServiceBlock>,
}

/// Figures for a whole plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlanSummary {
    pub engine:               String,
    pub nights:               Vec<NightSummary>,
    pub total_nights:         usize,
    pub total_deadhead_miles: f64,
    pub total_service_miles:  f64,
    pub total_hours:          f64,
}

impl PlanSummary {
    pub fn compute(cost: &CostModel<'_>, nights: &[NightRoute]) -> Self {
        let depot = cost.constraints().depot_location();

        let nights: Vec<NightSummary> = nights
            .iter()
            .enumerate()
            .map(|(i, night)| {
                let blocks = night.blocks.as_slice();
                NightSummary {
                    night_index:    i + 1,
                    duration_hours: cost.night_total_hours(depot, blocks),
                    deadhead:       cost.night_deadhead(depot, blocks),
                    service:        blocks.iter().map(|b| cost.service_cost(b)).sum(),
                    loopback:       blocks.iter().map(|b| cost.loopback_cost(b)).sum(),
                    legs:           cost.night_legs(depot, blocks),
                    blocks:         night.blocks.clone(),
                }
            })
            .collect();

        Self {
            engine:               cost.engine().name().to_string(),
            total_nights:         nights.len(),
            total_deadhead_miles: nights.iter().map(|n| n.deadhead.distance_mi).sum(),
            total_service_miles:  nights.iter().map(|n| n.service.distance_mi).sum(),
            total_hours:          nights.iter().map(|n| n.duration_hours).sum(),
            nights,
        }
    }
}
