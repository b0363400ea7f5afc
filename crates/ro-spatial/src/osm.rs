//! OSM PBF loader: enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use ro_spatial::osm::load_from_pbf;
//!
//! let network = load_from_pbf(Path::new("tampa.osm.pbf"), Some(area))?;
//! ```
//!
//! # What is loaded
//!
//! Only car-drivable `highway=*` ways are included (see [`is_drivable`]).
//! One-way roads add a single directed edge; two-way roads add both
//! directions.  When an area is given, only way nodes inside it are kept and
//! edges with an endpoint outside it are dropped.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use osmpbf::{Element, ElementReader};
use tracing::debug;

use ro_core::{BoundingBox, GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::SpatialError;

/// Load a drivable road network from an OSM PBF file, optionally clipped to
/// `area`.
///
/// # Errors
///
/// [`SpatialError::Osm`] on parse errors, [`SpatialError::Io`] on file errors.
pub fn load_from_pbf(path: &Path, area: Option<BoundingBox>) -> Result<RoadNetwork, SpatialError> {
    // ── Phase 1: collect nodes inside the area + drivable ways ────────────
    let reader = ElementReader::from_path(path)?;

    let inside = |p: GeoPoint| area.is_none_or(|a| a.contains(p));
    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let p = GeoPoint::new(n.lat(), n.lon());
                if inside(p) {
                    all_nodes.insert(n.id(), p);
                }
            }
            Element::DenseNode(n) => {
                let p = GeoPoint::new(n.lat(), n.lon());
                if inside(p) {
                    all_nodes.insert(n.id(), p);
                }
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .map(|(_, v)| *v);

                if let Some(highway) = highway.filter(|h| is_drivable(h)) {
                    let oneway = is_oneway(highway, &tags);
                    let refs: Vec<i64> = w.refs().collect();
                    road_ways.push(OsmWay { refs, oneway });
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    // ── Phase 2: road-referenced nodes that survived clipping ─────────────
    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .filter(|id| all_nodes.contains_key(id))
        .collect();

    // ── Phase 3: build network ────────────────────────────────────────────
    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    );

    // Sorted so NodeIds do not depend on HashSet iteration order.
    let mut ordered: Vec<i64> = road_node_ids.into_iter().collect();
    ordered.sort_unstable();

    let mut osm_to_ro: HashMap<i64, NodeId> = HashMap::with_capacity(ordered.len());
    for osm_id in ordered {
        let ro_id = builder.add_node(all_nodes[&osm_id]);
        osm_to_ro.insert(osm_id, ro_id);
    }
    drop(all_nodes);

    for way in &road_ways {
        for window in way.refs.windows(2) {
            if let (Some(&from), Some(&to)) = (osm_to_ro.get(&window[0]), osm_to_ro.get(&window[1])) {
                let len_mi = builder.node_pos(from).distance_mi(builder.node_pos(to));
                builder.add_directed_edge(from, to, len_mi);
                if !way.oneway {
                    builder.add_directed_edge(to, from, len_mi);
                }
            }
        }
    }

    debug!(
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        ways = road_ways.len(),
        "parsed OSM extract"
    );
    Ok(builder.build())
}

struct OsmWay {
    refs:   Vec<i64>,
    oneway: bool,
}

/// Whether a `highway` value is drivable by a survey vehicle.
fn is_drivable(highway: &str) -> bool {
    !matches!(
        highway,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "bridleway" | "corridor" | "proposed" | "construction"
    )
}

/// Motorways and motorway links are implicitly one-way in OSM convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags.iter().any(|(k, v)| {
        *k == "oneway" && matches!(*v, "yes" | "1" | "true")
    });
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || implicit
}
