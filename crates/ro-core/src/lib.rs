//! `ro-core`: foundational types for the `routeopt` night planner.
//!
//! This crate is a dependency of every other `ro-*` crate.  It has no `ro-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`geo`]         | `GeoPoint`, haversine miles, initial bearing, `BoundingBox` |
//! | [`measure`]     | `DistanceTime`                                             |
//! | [`ids`]         | `NodeId`, `EdgeId`                                         |
//! | [`segment`]     | `RoadSegment`                                              |
//! | [`constraints`] | `PlanningConstraints` and its sections                     |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod constraints;
pub mod error;
pub mod geo;
pub mod ids;
pub mod measure;
pub mod segment;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use constraints::{
    Depot, LaneSplit, LaneSplitStrategy, Limits, Loopback, LoopbackMode, Objective,
    OnewayDefault, PlanningConstraints, PrimaryObjective, RoutingEngineKind,
    SecondaryObjective, SpeedSettings, MIN_SPEED_MPH,
};
pub use error::{CoreError, CoreResult};
pub use geo::{normalize_deg, polyline_length_mi, BoundingBox, GeoPoint};
pub use ids::{EdgeId, NodeId};
pub use measure::DistanceTime;
pub use segment::RoadSegment;
