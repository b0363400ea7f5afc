//! Shortest-path search over the CSR road graph.
//!
//! Paths minimise **distance** (edge length in miles).  Durations are not
//! stored on edges; callers derive them from the path length.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ro_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the edges traversed and their total length.
#[derive(Debug, Clone)]
pub struct Route {
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Sum of `edge_length_mi` along `edges`.
    pub length_mi: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with `edge_length_mi` as the cost.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl DijkstraRouter {
    /// Shortest route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NodeNotFound`] if either id is outside the network,
    /// [`SpatialError::NoRoute`] if `to` is unreachable.
    pub fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        for node in [from, to] {
            if !network.contains(node) {
                return Err(SpatialError::NodeNotFound(node));
            }
        }
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Total order over non-NaN path lengths for the heap.
#[derive(Copy, Clone, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
    if from == to {
        return Ok(Route { edges: vec![], length_mi: 0.0 });
    }

    let n = network.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap via Reverse; NodeId as secondary key keeps tie-breaking
    // deterministic.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, to, cost));
        }

        // Stale entry.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + network.edge_length_mi[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], to: NodeId, length_mi: f64) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();
    Route { edges, length_mi }
}
