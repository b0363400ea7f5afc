//! Unit tests for ro-spatial.
//!
//! All tests use hand-crafted networks so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use ro_core::{GeoPoint, NodeId};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Small grid network.
    ///
    /// Nodes (lat, lon):
    ///   0:(0,0)  1:(0,1)  2:(0,2)
    ///   3:(1,0)           4:(1,2)
    ///
    /// Undirected edges: 0-1, 1-2, 0-3, 2-4, 3-4
    ///
    /// Lengths are chosen so the shortest 0→4 path is 0→1→2→4 (3 mi)
    /// rather than 0→3→4 (6 mi).
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();

        let n0 = b.add_node(GeoPoint::new(0.0, 0.0));
        let n1 = b.add_node(GeoPoint::new(0.0, 1.0));
        let n2 = b.add_node(GeoPoint::new(0.0, 2.0));
        let n3 = b.add_node(GeoPoint::new(1.0, 0.0));
        let n4 = b.add_node(GeoPoint::new(1.0, 2.0));

        b.add_road(n0, n1, 1.0);
        b.add_road(n1, n2, 1.0);
        b.add_road(n2, n4, 1.0);
        b.add_road(n0, n3, 5.0);
        b.add_road(n3, n4, 1.0);

        (b.build(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ro_core::GeoPoint;
    use crate::RoadNetworkBuilder;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        assert_eq!(net.out_degree(n0), 2);
        assert_eq!(net.out_degree(n1), 2);
        assert_eq!(net.out_degree(n2), 2);
        assert_eq!(net.out_degree(n3), 2);
        assert_eq!(net.out_degree(n4), 2);
        for e in net.out_edges(n0) {
            assert_eq!(net.edge_from[e.index()], n0);
        }
        assert!(net.out_edges(n0).any(|e| net.edge_to[e.index()] == n1));
    }

    #[test]
    fn directed_only_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 1.0);
        let net = b.build();
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.out_degree(a), 1);
        assert_eq!(net.out_degree(c), 0);
    }

    #[test]
    fn straight_edge_uses_great_circle() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_straight_edge(a, c);
        let net = b.build();
        let expected = GeoPoint::new(0.0, 0.0).distance_mi(GeoPoint::new(0.0, 1.0));
        assert!((net.edge_length_mi[0] - expected).abs() < 1e-12);
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use ro_core::GeoPoint;
    use crate::RoadNetworkBuilder;

    #[test]
    fn snap_nearest() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        assert_eq!(net.snap_to_node(GeoPoint::new(0.0, 0.0)), Some(n0));
        assert_eq!(net.snap_to_node(GeoPoint::new(0.0, 0.4)), Some(n0));
        assert_eq!(net.snap_to_node(GeoPoint::new(0.0, 0.6)), Some(n1));
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetworkBuilder::new().build();
        assert!(net.snap_to_node(GeoPoint::new(0.0, 0.0)).is_none());
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use ro_core::{GeoPoint, NodeId};
    use crate::{DijkstraRouter, RoadNetworkBuilder, SpatialError};

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let r = DijkstraRouter.route(&net, n0, n0).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.length_mi, 0.0);
    }

    #[test]
    fn shortest_path_correct() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::grid_network();
        let route = DijkstraRouter.route(&net, n0, n4).unwrap();

        assert_eq!(route.length_mi, 3.0);
        assert_eq!(route.edges.len(), 3);
        assert_eq!(net.edge_from[route.edges[0].index()], n0);
        assert_eq!(net.edge_to[route.edges[0].index()], n1);
        assert_eq!(net.edge_to[route.edges[1].index()], n2);
        assert_eq!(net.edge_to[route.edges[2].index()], n4);
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(1.0, 0.0));
        let net = b.build();
        let result = DijkstraRouter.route(&net, a, c);
        assert!(matches!(result, Err(SpatialError::NoRoute { .. })));
    }

    #[test]
    fn unknown_node() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let result = DijkstraRouter.route(&net, n0, NodeId(99));
        assert!(matches!(result, Err(SpatialError::NodeNotFound(NodeId(99)))));
    }

    #[test]
    fn directed_one_way_blocks_return() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 1.0);
        let net = b.build();

        assert!(DijkstraRouter.route(&net, a, c).is_ok());
        assert!(DijkstraRouter.route(&net, c, a).is_err());
    }
}

// ── Routing engines ───────────────────────────────────────────────────────────

#[cfg(test)]
mod engines {
    use ro_core::{BoundingBox, DistanceTime, GeoPoint, MIN_SPEED_MPH};
    use crate::{
        DirectLineEngine, NetworkEngine, RoadNetwork, RoadNetworkBuilder, RoutingEngine,
        SpatialError,
    };

    #[test]
    fn direct_line_matches_haversine() {
        let engine = DirectLineEngine::new(60.0);
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let dt = engine.distance_time(a, b);
        assert_eq!(dt.distance_mi, a.distance_mi(b));
        assert!((dt.duration_h - dt.distance_mi / 60.0).abs() < 1e-12);
        assert_eq!(engine.name(), "direct_line");
    }

    #[test]
    fn direct_line_zero_speed_is_floored() {
        let engine = DirectLineEngine::new(0.0);
        assert_eq!(engine.deadhead_mph(), MIN_SPEED_MPH);
        let dt = engine.distance_time(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0));
        assert_eq!(dt, DistanceTime::ZERO);
    }

    #[test]
    fn network_uses_shortest_path_and_caches() {
        let (net, _) = super::helpers::grid_network();
        let engine = NetworkEngine::new(net, 30.0).unwrap();

        // Points near n0 and n4 snap onto them.
        let a = GeoPoint::new(0.01, 0.01);
        let b = GeoPoint::new(0.99, 1.99);
        let dt = engine.distance_time(a, b);
        assert_eq!(dt.distance_mi, 3.0);
        assert!((dt.duration_h - 0.1).abs() < 1e-12);
        assert_eq!(engine.cached_paths(), 1);

        // Same node pair: served from the cache.
        let again = engine.distance_time(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 2.0));
        assert_eq!(again, dt);
        assert_eq!(engine.cached_paths(), 1);
        assert_eq!(engine.name(), "network");
    }

    #[test]
    fn network_unreachable_pair() {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(GeoPoint::new(0.0, 0.0));
        let n1 = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(n0, n1, 1.0);
        let engine = NetworkEngine::new(b.build(), 30.0).unwrap();

        let back = engine.try_distance_time(GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 0.0));
        assert!(matches!(back, Err(SpatialError::NoRoute { .. })));
        let dt = engine.distance_time(GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 0.0));
        assert!(!dt.is_finite());
    }

    #[test]
    fn network_empty_fails_fast() {
        let result = NetworkEngine::new(RoadNetwork::empty(), 30.0);
        assert!(matches!(result, Err(SpatialError::NetworkUnavailable(_))));
    }

    #[test]
    fn network_without_source_fails_fast() {
        let area = BoundingBox { south: 0.0, west: 0.0, north: 1.0, east: 1.0 };
        let result = NetworkEngine::load(None, area, 30.0);
        assert!(matches!(result, Err(SpatialError::NetworkUnavailable(_))));
    }

    #[cfg(not(feature = "osm"))]
    #[test]
    fn network_without_osm_feature_fails_fast() {
        let area = BoundingBox { south: 0.0, west: 0.0, north: 1.0, east: 1.0 };
        let result = NetworkEngine::load(Some(std::path::Path::new("area.osm.pbf")), area, 30.0);
        assert!(matches!(result, Err(SpatialError::NetworkUnavailable(_))));
    }

    #[test]
    fn engines_are_object_safe() {
        let engines: Vec<Box<dyn RoutingEngine>> = vec![
            Box::new(DirectLineEngine::new(45.0)),
            Box::new(NetworkEngine::new(super::helpers::grid_network().0, 45.0).unwrap()),
        ];
        let p = GeoPoint::new(0.0, 0.0);
        for e in &engines {
            assert_eq!(e.distance_time(p, p).distance_mi, 0.0);
        }
    }
}

// ── Routing properties ────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use ro_core::{DistanceTime, GeoPoint, NodeId};
    use crate::{DijkstraRouter, NetworkEngine, RoadNetwork, RoadNetworkBuilder, RoutingEngine};

    /// Five nodes chained by two-way roads of `chain` lengths, plus `extra`
    /// two-way shortcuts (self-loops skipped).
    fn random_network(chain: &[f64], extra: &[(usize, usize, f64)]) -> (RoadNetwork, Vec<NodeId>) {
        let mut b = RoadNetworkBuilder::new();
        let ids: Vec<NodeId> = (0..=chain.len())
            .map(|i| b.add_node(GeoPoint::new(0.0, i as f64 * 0.1)))
            .collect();
        for (i, &len) in chain.iter().enumerate() {
            b.add_road(ids[i], ids[i + 1], len);
        }
        for &(u, v, len) in extra {
            if u != v {
                b.add_road(ids[u], ids[v], len);
            }
        }
        (b.build(), ids)
    }

    fn shortest(net: &RoadNetwork, a: NodeId, b: NodeId) -> f64 {
        DijkstraRouter.route(net, a, b).unwrap().length_mi
    }

    proptest! {
        #[test]
        fn shortest_path_never_exceeds_a_direct_road(
            chain in prop::collection::vec(0.1f64..10.0, 4),
            extra in prop::collection::vec((0usize..5, 0usize..5, 0.1f64..10.0), 0..8),
        ) {
            let (net, _) = random_network(&chain, &extra);
            for e in 0..net.edge_count() {
                let (from, to) = (net.edge_from[e], net.edge_to[e]);
                prop_assert!(shortest(&net, from, to) <= net.edge_length_mi[e] + 1e-9);
            }
        }

        #[test]
        fn two_way_distances_are_symmetric_and_triangular(
            chain in prop::collection::vec(0.1f64..10.0, 4),
            extra in prop::collection::vec((0usize..5, 0usize..5, 0.1f64..10.0), 0..8),
            a in 0usize..5, b in 0usize..5, c in 0usize..5,
        ) {
            let (net, ids) = random_network(&chain, &extra);
            let (a, b, c) = (ids[a], ids[b], ids[c]);
            prop_assert!((shortest(&net, a, b) - shortest(&net, b, a)).abs() < 1e-9);
            prop_assert!(shortest(&net, a, c) <= shortest(&net, a, b) + shortest(&net, b, c) + 1e-9);
        }

        #[test]
        fn same_point_costs_nothing(lat in -1.0f64..2.0, lon in -1.0f64..3.0) {
            let engine = NetworkEngine::new(super::helpers::grid_network().0, 30.0).unwrap();
            let p = GeoPoint::new(lat, lon);
            prop_assert_eq!(engine.distance_time(p, p), DistanceTime::ZERO);
        }
    }
}
