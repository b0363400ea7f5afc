//! `ro-plan`: the night-assignment planning engine.
//!
//! # Pipeline
//!
//! ```text
//! RoadSegment[] ──build_service_blocks──▶ ServiceBlock[]
//!                                              │
//! PlanningConstraints ──build_engine──▶ RoutingEngine (one per solve)
//!                                              │
//!                         GreedySolver ──▶ NightRoute[] ──▶ PlanSummary
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`blocks`]   | `ServiceBlock`, `Direction`, lane split, block derivation  |
//! | [`cost`]     | `CostModel`: service, loopback, deadhead, night totals     |
//! | [`engine`]   | `build_engine`, `planning_area`, `padded_planning_area`    |
//! | [`night`]    | `NightRoute`                                               |
//! | [`solver`]   | `GreedySolver`, `Plan`                                     |
//! | [`observer`] | `SolveObserver`, `NoopObserver`                            |
//! | [`report`]   | `PlanSummary`, `NightSummary`                              |
//! | [`error`]    | `PlanError`, `PlanResult<T>`                               |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Candidate evaluation across nights on Rayon.           |
//! | `serde`    | `Serialize` on blocks, nights, legs, and summaries.    |
//! | `osm`      | Network engine can load OSM PBF extracts.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ro_plan::{build_service_blocks, GreedySolver};
//!
//! let blocks = build_service_blocks(&segments, constraints.lane_split.strategy);
//! let plan = GreedySolver::new(&constraints).solve(&blocks)?;
//! for night in plan.summary(&constraints).nights {
//!     println!("night {}: {:.2} h", night.night_index, night.duration_hours);
//! }
//! ```

pub mod blocks;
pub mod cost;
pub mod engine;
pub mod error;
pub mod night;
pub mod observer;
pub mod report;
pub mod solver;


pub use blocks::{
    blocks_for_segment, build_service_blocks, split_lanes, split_lanes_balanced, Direction,
    ServiceBlock,
};
pub use cost::{CostModel, DeadheadLeg, Stop};
pub use engine::{build_engine, padded_planning_area, planning_area};
pub use error::{PlanError, PlanResult};
pub use night::NightRoute;
pub use observer::{NoopObserver, SolveObserver};
pub use report::{NightSummary, PlanSummary};
pub use solver::{GreedySolver, Plan};
