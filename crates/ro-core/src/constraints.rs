//! Planning parameters for one solve.
//!
//! The layout mirrors the constraints file read by `ro-ingest`: one section
//! per concern, every field optional except the depot coordinates.
//!
//! ```json
//! {
//!   "depot":   { "lat": 28.05, "lon": -82.41 },
//!   "limits":  { "max_hours_per_night": 4.0, "max_nights": 200 },
//!   "speed":   { "service_factor": 1.0, "deadhead_factor": 1.0, "deadhead_speed_mph": 45.0 },
//!   "loopback": { "mode": "constant", "constant_seconds": 60 },
//!   "routing_engine": "direct_line"
//! }
//! ```

use std::path::PathBuf;

use crate::{CoreError, CoreResult, GeoPoint};

/// Floor applied to every effective speed so a zero factor never divides by
/// zero.
pub const MIN_SPEED_MPH: f64 = 1e-6;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    #[cfg_attr(feature = "serde", serde(default = "default_depot_name"))]
    pub name: String,
    pub lat:  f64,
    pub lon:  f64,
}

#[cfg(feature = "serde")]
fn default_depot_name() -> String {
    "Depot".to_string()
}

impl Depot {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { name: "Depot".to_string(), lat, lon }
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    pub max_hours_per_night: f64,
    pub max_nights:          u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_hours_per_night: 4.0, max_nights: 200 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedSettings {
    /// Scales the posted limit while measuring; capped at 1.0 when used.
    pub service_factor:     f64,
    pub deadhead_factor:    f64,
    pub deadhead_speed_mph: f64,
}

impl Default for SpeedSettings {
    fn default() -> Self {
        Self { service_factor: 1.0, deadhead_factor: 1.0, deadhead_speed_mph: 45.0 }
    }
}

impl SpeedSettings {
    /// `deadhead_speed_mph × deadhead_factor`, floored at [`MIN_SPEED_MPH`].
    #[inline]
    pub fn effective_deadhead_mph(&self) -> f64 {
        (self.deadhead_speed_mph * self.deadhead_factor).max(MIN_SPEED_MPH)
    }

    /// Measuring speed on a road posted at `speed_limit_mph`.
    #[inline]
    pub fn effective_service_mph(&self, speed_limit_mph: f64) -> f64 {
        (speed_limit_mph * self.service_factor.min(1.0)).max(MIN_SPEED_MPH)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LaneSplitStrategy {
    /// `ceil(L/2)` lanes to direction A, `floor(L/2)` to direction B.
    #[default]
    Balanced,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LaneSplit {
    pub strategy: LaneSplitStrategy,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OnewayDefault {
    /// Applied by the reader to segments with no one-way attribute.
    pub default: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoopbackMode {
    /// Fixed repositioning time per extra pass, zero distance.
    #[default]
    Constant,
    /// One end→start engine query per extra pass.
    Routing,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Loopback {
    pub mode:             LoopbackMode,
    pub constant_seconds: f64,
}

impl Default for Loopback {
    fn default() -> Self {
        Self { mode: LoopbackMode::Constant, constant_seconds: 60.0 }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrimaryObjective {
    #[default]
    MinDeadheadDistance,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SecondaryObjective {
    #[default]
    MinDeadheadTime,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Objective {
    pub primary:   PrimaryObjective,
    pub secondary: SecondaryObjective,
}

/// Which distance/time strategy the solve uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoutingEngineKind {
    /// Great-circle distance at the effective deadhead speed.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "euclidean"))]
    DirectLine,
    /// Shortest path over a drivable road graph.
    #[cfg_attr(feature = "serde", serde(alias = "osmnx", alias = "osm"))]
    Network,
}

impl std::fmt::Display for RoutingEngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RoutingEngineKind::DirectLine => "direct_line",
            RoutingEngineKind::Network    => "network",
        })
    }
}

// ── PlanningConstraints ───────────────────────────────────────────────────────

/// Everything one solve needs to know besides the service blocks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanningConstraints {
    pub depot: Depot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub limits: Limits,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: SpeedSettings,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lane_split: LaneSplit,
    #[cfg_attr(feature = "serde", serde(default))]
    pub oneway: OnewayDefault,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loopback: Loopback,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objective: Objective,
    #[cfg_attr(feature = "serde", serde(default))]
    pub routing_engine: RoutingEngineKind,
    /// Padding around the solve area when clipping the road graph.
    #[cfg_attr(feature = "serde", serde(default = "default_osm_buffer_miles"))]
    pub osm_buffer_miles: f64,
    /// OSM PBF extract the network strategy loads its graph from.
    #[cfg_attr(feature = "serde", serde(default))]
    pub osm_source: Option<PathBuf>,
}

#[cfg(feature = "serde")]
fn default_osm_buffer_miles() -> f64 {
    2.0
}

impl PlanningConstraints {
    /// Defaults everywhere, depot at `(lat, lon)`.
    pub fn with_depot(lat: f64, lon: f64) -> Self {
        Self {
            depot:            Depot::new(lat, lon),
            limits:           Limits::default(),
            speed:            SpeedSettings::default(),
            lane_split:       LaneSplit::default(),
            oneway:           OnewayDefault::default(),
            loopback:         Loopback::default(),
            objective:        Objective::default(),
            routing_engine:   RoutingEngineKind::default(),
            osm_buffer_miles: 2.0,
            osm_source:       None,
        }
    }

    #[inline]
    pub fn depot_location(&self) -> GeoPoint {
        self.depot.location()
    }

    /// Check numeric fields before a solve.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidConstraint`] naming the first offending field.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |field: &'static str, reason: String| {
            Err(CoreError::InvalidConstraint { field, reason })
        };

        if !(-90.0..=90.0).contains(&self.depot.lat) {
            return invalid("depot.lat", format!("{} is outside [-90, 90]", self.depot.lat));
        }
        if !(-180.0..=180.0).contains(&self.depot.lon) {
            return invalid("depot.lon", format!("{} is outside [-180, 180]", self.depot.lon));
        }
        if !(self.limits.max_hours_per_night.is_finite() && self.limits.max_hours_per_night > 0.0) {
            return invalid(
                "limits.max_hours_per_night",
                format!("must be > 0, got {}", self.limits.max_hours_per_night),
            );
        }
        if self.limits.max_nights == 0 {
            return invalid("limits.max_nights", "must be >= 1".into());
        }

        let non_negative = [
            ("speed.service_factor",      self.speed.service_factor),
            ("speed.deadhead_factor",     self.speed.deadhead_factor),
            ("speed.deadhead_speed_mph",  self.speed.deadhead_speed_mph),
            ("loopback.constant_seconds", self.loopback.constant_seconds),
            ("osm_buffer_miles",          self.osm_buffer_miles),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, format!("must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}
