//! Point-to-point distance/time strategies.
//!
//! The planner asks one question of the world: how far, and how long, from
//! point A to point B.  [`RoutingEngine`] is that question; the two answers
//! are [`DirectLineEngine`] (great-circle estimate) and [`NetworkEngine`]
//! (shortest path over a drivable road graph).  One engine is built per solve
//! and shared by reference; engines are `Send + Sync`.
//!
//! Queries are directed.  `distance_time(a, b)` and `distance_time(b, a)`
//! agree for the direct-line strategy but not necessarily on a graph with
//! one-way edges.

use std::path::Path;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use ro_core::{BoundingBox, DistanceTime, GeoPoint, NodeId, MIN_SPEED_MPH};

use crate::network::RoadNetwork;
use crate::router::DijkstraRouter;
use crate::{SpatialError, SpatialResult};

// ── RoutingEngine trait ───────────────────────────────────────────────────────

/// Distance (miles) and deadhead duration (hours) between two points.
pub trait RoutingEngine: Send + Sync {
    fn distance_time(&self, a: GeoPoint, b: GeoPoint) -> DistanceTime;

    /// Short identifier for logs and reports.
    fn name(&self) -> &'static str;
}

// ── DirectLineEngine ──────────────────────────────────────────────────────────

/// Great-circle distance travelled at a constant deadhead speed.
#[derive(Clone, Copy, Debug)]
pub struct DirectLineEngine {
    deadhead_mph: f64,
}

impl DirectLineEngine {
    /// `deadhead_mph` is floored at [`MIN_SPEED_MPH`].
    pub fn new(deadhead_mph: f64) -> Self {
        Self { deadhead_mph: deadhead_mph.max(MIN_SPEED_MPH) }
    }

    pub fn deadhead_mph(&self) -> f64 {
        self.deadhead_mph
    }
}

impl RoutingEngine for DirectLineEngine {
    fn distance_time(&self, a: GeoPoint, b: GeoPoint) -> DistanceTime {
        let miles = a.distance_mi(b);
        DistanceTime::new(miles, miles / self.deadhead_mph)
    }

    fn name(&self) -> &'static str {
        "direct_line"
    }
}

// ── NetworkEngine ─────────────────────────────────────────────────────────────

/// Shortest-distance paths over a [`RoadNetwork`].
///
/// Query points are snapped to their nearest graph node.  Both the snap and
/// the node-pair path length are memoised; the solver repeats the same
/// queries many times per solve.  Caches sit behind `RwLock`s and every
/// write stores the value any other writer would have computed, so
/// concurrent readers never observe a wrong answer.
pub struct NetworkEngine {
    network:      RoadNetwork,
    router:       DijkstraRouter,
    deadhead_mph: f64,
    nearest:      RwLock<FxHashMap<(u64, u64), NodeId>>,
    /// `None` marks a pair with no path.
    paths:        RwLock<FxHashMap<(NodeId, NodeId), Option<f64>>>,
}

impl NetworkEngine {
    /// Wrap an already-built network.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NetworkUnavailable`] if `network` has no nodes.
    pub fn new(network: RoadNetwork, deadhead_mph: f64) -> SpatialResult<Self> {
        if network.is_empty() {
            return Err(SpatialError::NetworkUnavailable(
                "road network has no nodes inside the planning area".into(),
            ));
        }
        info!(
            nodes = network.node_count(),
            edges = network.edge_count(),
            "network routing engine ready"
        );
        Ok(Self {
            network,
            router: DijkstraRouter,
            deadhead_mph: deadhead_mph.max(MIN_SPEED_MPH),
            nearest: RwLock::new(FxHashMap::default()),
            paths: RwLock::new(FxHashMap::default()),
        })
    }

    /// Load the drivable graph for `area` from an OSM PBF extract.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NetworkUnavailable`] when no source is given, when the
    /// crate was built without the `osm` feature, or when the clipped graph
    /// is empty; [`SpatialError::Io`] / `Osm` when the file cannot be read.
    pub fn load(source: Option<&Path>, area: BoundingBox, deadhead_mph: f64) -> SpatialResult<Self> {
        let Some(path) = source else {
            return Err(SpatialError::NetworkUnavailable(
                "network routing requires `osm_source` (an OSM PBF extract)".into(),
            ));
        };
        Self::load_pbf(path, area, deadhead_mph)
    }

    #[cfg(feature = "osm")]
    fn load_pbf(path: &Path, area: BoundingBox, deadhead_mph: f64) -> SpatialResult<Self> {
        info!(path = %path.display(), ?area, "loading drivable road graph");
        let network = crate::osm::load_from_pbf(path, Some(area))?;
        Self::new(network, deadhead_mph)
    }

    #[cfg(not(feature = "osm"))]
    fn load_pbf(path: &Path, _area: BoundingBox, _deadhead_mph: f64) -> SpatialResult<Self> {
        Err(SpatialError::NetworkUnavailable(format!(
            "cannot read {}: ro-spatial was built without the `osm` feature",
            path.display()
        )))
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    /// Number of memoised node-pair paths.
    pub fn cached_paths(&self) -> usize {
        self.paths.read().len()
    }

    /// Like [`RoutingEngine::distance_time`] but reports unreachable pairs.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NoRoute`] if the snapped nodes are disconnected.
    pub fn try_distance_time(&self, a: GeoPoint, b: GeoPoint) -> SpatialResult<DistanceTime> {
        let from = self.nearest_node(a)?;
        let to   = self.nearest_node(b)?;
        match self.path_length(from, to) {
            Some(miles) => Ok(DistanceTime::new(miles, miles / self.deadhead_mph)),
            None        => Err(SpatialError::NoRoute { from, to }),
        }
    }

    fn nearest_node(&self, p: GeoPoint) -> SpatialResult<NodeId> {
        let key = p.key();
        if let Some(&id) = self.nearest.read().get(&key) {
            return Ok(id);
        }
        let id = self
            .network
            .snap_to_node(p)
            .ok_or_else(|| SpatialError::NetworkUnavailable("road network has no nodes".into()))?;
        self.nearest.write().insert(key, id);
        Ok(id)
    }

    fn path_length(&self, from: NodeId, to: NodeId) -> Option<f64> {
        if let Some(&cached) = self.paths.read().get(&(from, to)) {
            return cached;
        }
        let length = match self.router.route(&self.network, from, to) {
            Ok(route) => Some(route.length_mi),
            Err(e) => {
                warn!(%from, %to, error = %e, "no drivable path between snapped nodes");
                None
            }
        };
        let mut paths = self.paths.write();
        paths.insert((from, to), length);
        if paths.len().is_power_of_two() {
            debug!(cached = paths.len(), "network path cache grew");
        }
        length
    }
}

impl RoutingEngine for NetworkEngine {
    /// Unreachable pairs come back as [`DistanceTime::UNREACHABLE`], which no
    /// finite hour budget admits.
    fn distance_time(&self, a: GeoPoint, b: GeoPoint) -> DistanceTime {
        self.try_distance_time(a, b).unwrap_or(DistanceTime::UNREACHABLE)
    }

    fn name(&self) -> &'static str {
        "network"
    }
}
