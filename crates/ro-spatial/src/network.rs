//! Drivable road graph and its builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge arrays (`edge_from`, `edge_to`, `edge_length_mi`) are sorted by
//! source node and indexed by `EdgeId`, so a node's outgoing edges are a
//! contiguous scan in Dijkstra's inner loop.
//!
//! Edges carry only a length.  Deadhead duration is derived from length at
//! query time with the solve's effective deadhead speed.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`, used to
//! snap depot and block endpoints onto the graph.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ro_core::{EdgeId, GeoPoint, NodeId};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough for snapping
    /// within a planning area.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Fields are `pub` for indexed access on hot paths.  Build with
/// [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// CSR row pointer, length `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge; used to walk predecessor edges back.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in miles.
    pub edge_length_mi: Vec<f64>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Nearest road node to `pos`, or `None` if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ro_core::GeoPoint;
/// use ro_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(28.05, -82.41));
/// let c = b.add_node(GeoPoint::new(28.06, -82.41));
/// b.add_road(a, c, 0.69);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:      NodeId,
    to:        NodeId,
    length_mi: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge of `length_mi` miles.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_mi: f64) {
        self.raw_edges.push(RawEdge { from, to, length_mi });
    }

    /// Add edges in both directions for a two-way road.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_mi: f64) {
        self.add_directed_edge(a, b, length_mi);
        self.add_directed_edge(b, a, length_mi);
    }

    /// Add a directed edge whose length is the great-circle distance between
    /// the two nodes.
    pub fn add_straight_edge(&mut self, from: NodeId, to: NodeId) {
        let len = self.node_pos(from).distance_mi(self.node_pos(to));
        self.add_directed_edge(from, to, len);
    }

    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// O(E log E) for the edge sort plus O(N log N) for the R-tree bulk load.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps insertion order among a node's edges, so
        // equal-length ties resolve the same way on every build.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:      Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:        Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_mi: Vec<f64>    = raw.iter().map(|e| e.length_mi).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_mi,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
