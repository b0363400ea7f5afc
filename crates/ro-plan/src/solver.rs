//! Greedy night-assignment solver.
//!
//! # Algorithm
//!
//! ```text
//! engine ← build_engine(constraints, blocks)            (once per solve)
//! order blocks by service duration, descending (stable)
//! for block in order:
//!   for night in nights, for pos in 0..=night.len():
//!     candidate ← night with block inserted at pos
//!     skip if night_total_hours(candidate) > max_hours_per_night
//!     keep if deadhead distance is lowest so far,
//!          or equal distance with lower deadhead duration
//!   found      → commit the candidate
//!   not found  → open a new night, unless the block alone overflows a
//!                night or max_nights is already reached
//! ```
//!
//! Ties beyond (distance, duration) go to the first candidate found, with
//! nights in creation order and positions left to right.  That order is part
//! of the output contract: identical input gives identical nights.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Evaluates each night's positions on Rayon's thread pool.   |
//! |            | The reduction keeps the sequential tie-break order.        |

use std::iter::once;

use tracing::{debug, info, trace};

use ro_core::{DistanceTime, GeoPoint, PlanningConstraints};
use ro_spatial::RoutingEngine;

use crate::blocks::ServiceBlock;
use crate::cost::CostModel;
use crate::engine::build_engine;
use crate::night::NightRoute;
use crate::observer::{NoopObserver, SolveObserver};
use crate::report::PlanSummary;
use crate::{PlanError, PlanResult};

// ── Plan ──────────────────────────────────────────────────────────────────────

/// A finished solve: the nights plus the engine that priced them, kept so
/// reports can be computed against the same distances.
pub struct Plan {
    pub nights: Vec<NightRoute>,
    pub engine: Box<dyn RoutingEngine>,
}

impl Plan {
    /// Per-night figures and totals, priced with the planning engine.
    pub fn summary(&self, constraints: &PlanningConstraints) -> PlanSummary {
        PlanSummary::compute(&CostModel::new(constraints, self.engine.as_ref()), &self.nights)
    }
}

// ── Insertion candidates ──────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct Candidate {
    night:    usize,
    position: usize,
    deadhead: DistanceTime,
}

impl Candidate {
    /// Strictly better on (deadhead distance, deadhead duration); equal
    /// candidates keep the incumbent.
    #[inline]
    fn beats(&self, incumbent: &Candidate) -> bool {
        self.deadhead.distance_mi < incumbent.deadhead.distance_mi
            || (self.deadhead.distance_mi == incumbent.deadhead.distance_mi
                && self.deadhead.duration_h < incumbent.deadhead.duration_h)
    }
}

fn pick(best: Option<Candidate>, next: Option<Candidate>) -> Option<Candidate> {
    match (best, next) {
        (Some(b), Some(n)) if n.beats(&b) => Some(n),
        (None, n) => n,
        (b, _) => b,
    }
}

// ── Solver state ──────────────────────────────────────────────────────────────

/// Working state of one solve.  Nights hold indices into `blocks`; each
/// block's service + loopback cost is priced once up front.
struct Workspace<'s> {
    cost:      CostModel<'s>,
    depot:     GeoPoint,
    max_hours: f64,
    blocks:    &'s [ServiceBlock],
    service:   Vec<DistanceTime>,
    nights:    Vec<Vec<usize>>,
}

impl Workspace<'_> {
    /// Deadhead of `seq` if the whole night fits the hour budget.
    ///
    /// Sums in the same order as `CostModel::night_total_hours`, so a night
    /// accepted here re-prices to the same hours.
    fn feasible_deadhead<'i, I>(&self, seq: I) -> Option<DistanceTime>
    where
        I: Iterator<Item = &'i usize> + Clone,
    {
        let deadhead = self
            .cost
            .deadhead_chain(self.depot, seq.clone().map(|&i| &self.blocks[i]));
        let service: DistanceTime = seq.map(|&i| self.service[i]).sum();
        let hours = deadhead.duration_h + service.duration_h;
        // Written so NaN is rejected too.
        if hours <= self.max_hours { Some(deadhead) } else { None }
    }

    /// Best feasible position for `block` in night `night`.
    fn best_in_night(&self, night: usize, block: usize) -> Option<Candidate> {
        let seq = &self.nights[night];
        (0..=seq.len())
            .map(|position| {
                let candidate = seq[..position].iter().chain(once(&block)).chain(seq[position..].iter());
                self.feasible_deadhead(candidate)
                    .map(|deadhead| Candidate { night, position, deadhead })
            })
            .fold(None, pick)
    }

    #[cfg(not(feature = "parallel"))]
    fn best_insertion(&self, block: usize) -> Option<Candidate> {
        (0..self.nights.len())
            .map(|night| self.best_in_night(night, block))
            .fold(None, pick)
    }

    #[cfg(feature = "parallel")]
    fn best_insertion(&self, block: usize) -> Option<Candidate> {
        use rayon::prelude::*;

        // Collect keeps night order; the fold below then applies the same
        // first-found tie-break as the sequential path.
        let per_night: Vec<Option<Candidate>> = (0..self.nights.len())
            .into_par_iter()
            .map(|night| self.best_in_night(night, block))
            .collect();
        per_night.into_iter().fold(None, pick)
    }

    fn solo_hours(&self, block: usize) -> f64 {
        let seq = [block];
        let deadhead = self.cost.deadhead_chain(self.depot, seq.iter().map(|&i| &self.blocks[i]));
        deadhead.duration_h + self.service[block].duration_h
    }
}

// ── GreedySolver ──────────────────────────────────────────────────────────────

/// Deterministic greedy insertion of service blocks into nights.
///
/// # Example
///
/// ```rust,ignore
/// let blocks = build_service_blocks(&segments, constraints.lane_split.strategy);
/// let plan = GreedySolver::new(&constraints).solve(&blocks)?;
/// let summary = plan.summary(&constraints);
/// ```
pub struct GreedySolver<'c> {
    constraints: &'c PlanningConstraints,
}

impl<'c> GreedySolver<'c> {
    pub fn new(constraints: &'c PlanningConstraints) -> Self {
        Self { constraints }
    }

    /// Validate constraints, build the engine, and solve.
    ///
    /// # Errors
    ///
    /// [`PlanError::Input`] for invalid constraints, [`PlanError::Engine`]
    /// when the routing engine cannot be built, and the two infeasibility
    /// variants from [`solve_with_engine`](Self::solve_with_engine).
    pub fn solve(&self, blocks: &[ServiceBlock]) -> PlanResult<Plan> {
        self.constraints.validate()?;
        let engine = build_engine(self.constraints, blocks)?;
        let nights = self.solve_with_engine(engine.as_ref(), blocks, &mut NoopObserver)?;
        Ok(Plan { nights, engine })
    }

    /// Solve against a caller-supplied engine.
    ///
    /// # Errors
    ///
    /// [`PlanError::BlockExceedsNight`] if a block alone exceeds
    /// `max_hours_per_night`; [`PlanError::NightLimitExceeded`] if another
    /// night is needed past `max_nights`.
    pub fn solve_with_engine<O: SolveObserver>(
        &self,
        engine:   &dyn RoutingEngine,
        blocks:   &[ServiceBlock],
        observer: &mut O,
    ) -> PlanResult<Vec<NightRoute>> {
        let cost = CostModel::new(self.constraints, engine);
        let limits = &self.constraints.limits;

        info!(
            blocks = blocks.len(),
            engine = engine.name(),
            max_hours_per_night = limits.max_hours_per_night,
            max_nights = limits.max_nights,
            "greedy solve started"
        );

        // Hardest first; `sort_by` is stable so ties keep input order.
        let service_hours: Vec<f64> = blocks.iter().map(|b| cost.service_cost(b).duration_h).collect();
        let mut order: Vec<usize> = (0..blocks.len()).collect();
        order.sort_by(|&a, &b| service_hours[b].total_cmp(&service_hours[a]));

        let mut ws = Workspace {
            cost,
            depot:     self.constraints.depot_location(),
            max_hours: limits.max_hours_per_night,
            blocks,
            service:   blocks.iter().map(|b| cost.block_service(b)).collect(),
            nights:    Vec::new(),
        };

        for idx in order {
            let block = &blocks[idx];

            if let Some(best) = ws.best_insertion(idx) {
                ws.nights[best.night].insert(best.position, idx);
                trace!(
                    block = %block.label(),
                    night = best.night,
                    position = best.position,
                    deadhead_mi = best.deadhead.distance_mi,
                    "block inserted"
                );
                observer.on_block_placed(block, best.night, best.position);
                continue;
            }

            let solo = ws.solo_hours(idx);
            if !(solo <= limits.max_hours_per_night) {
                return Err(PlanError::BlockExceedsNight {
                    roadway_id: block.roadway_id.clone(),
                    direction:  block.direction,
                    hours:      solo,
                    max_hours:  limits.max_hours_per_night,
                });
            }
            if ws.nights.len() + 1 > limits.max_nights as usize {
                return Err(PlanError::NightLimitExceeded {
                    max_nights: limits.max_nights,
                    roadway_id: block.roadway_id.clone(),
                    direction:  block.direction,
                });
            }

            ws.nights.push(vec![idx]);
            let night = ws.nights.len() - 1;
            debug!(night, block = %block.label(), hours = solo, "night opened");
            observer.on_night_opened(night, block);
        }

        let nights: Vec<NightRoute> = ws
            .nights
            .into_iter()
            .map(|seq| NightRoute::new(seq.into_iter().map(|i| blocks[i].clone()).collect()))
            .collect();

        info!(nights = nights.len(), "greedy solve finished");
        observer.on_solve_end(&nights);
        Ok(nights)
    }
}
