//! Routing-engine selection for one solve.

use tracing::info;

use ro_core::{BoundingBox, GeoPoint, PlanningConstraints, RoutingEngineKind};
use ro_spatial::{DirectLineEngine, NetworkEngine, RoutingEngine};

use crate::blocks::ServiceBlock;
use crate::PlanResult;

/// Build the engine named by `constraints.routing_engine`.
///
/// The network strategy covers the depot and every block endpoint, padded by
/// `osm_buffer_miles`.  It fails here, before any solving, if its graph
/// cannot be loaded; it never falls back to direct-line.
pub fn build_engine(
    constraints: &PlanningConstraints,
    blocks:      &[ServiceBlock],
) -> PlanResult<Box<dyn RoutingEngine>> {
    let mph = constraints.speed.effective_deadhead_mph();

    let engine: Box<dyn RoutingEngine> = match constraints.routing_engine {
        RoutingEngineKind::DirectLine => Box::new(DirectLineEngine::new(mph)),
        RoutingEngineKind::Network => {
            let area = padded_planning_area(
                constraints.depot_location(),
                blocks,
                constraints.osm_buffer_miles,
            );
            Box::new(NetworkEngine::load(constraints.osm_source.as_deref(), area, mph)?)
        }
    };

    info!(engine = engine.name(), deadhead_mph = mph, "routing engine built");
    Ok(engine)
}

/// Bounding box of the depot and all block endpoints.
pub fn planning_area(depot: GeoPoint, blocks: &[ServiceBlock]) -> BoundingBox {
    let points = std::iter::once(depot).chain(blocks.iter().flat_map(|b| [b.start, b.end]));
    // Never empty: the depot is always present.
    BoundingBox::covering(points).unwrap_or(BoundingBox {
        south: depot.lat,
        west:  depot.lon,
        north: depot.lat,
        east:  depot.lon,
    })
}

/// [`planning_area`] grown by `buffer_miles` on every side.
///
/// Longitude padding is scaled at the mean latitude of the depot and all
/// block endpoints.
pub fn padded_planning_area(depot: GeoPoint, blocks: &[ServiceBlock], buffer_miles: f64) -> BoundingBox {
    let lat_sum: f64 = blocks.iter().map(|b| b.start.lat + b.end.lat).sum::<f64>() + depot.lat;
    let mean_lat = lat_sum / (1 + 2 * blocks.len()) as f64;
    planning_area(depot, blocks).expand_miles(buffer_miles, mean_lat)
}
