//! Tile graph representation and builder.
//!
//! # Data layout
//!
//! Nodes are stored densely in ascending `NodeId` order; `index` maps the
//! caller-assigned (possibly sparse) ids to dense positions.  Outgoing edges
//! use **Compressed Sparse Row (CSR)** format: the edges of dense node `i`
//! occupy `node_out_start[i] .. node_out_start[i + 1]`, sorted by
//! destination id so neighbour iteration order never depends on insertion
//! order.
//!
//! Edge weights are the Euclidean distance between endpoint positions,
//! computed once at build time.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a world point to the nearest node.  Used to
//! snap the agent's position and fixed destinations onto the graph.

use std::collections::BTreeMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use dpm_core::{EdgeId, NodeId, Vec2};

use crate::{GraphError, GraphResult};

// ── Public value types ────────────────────────────────────────────────────────

/// A graph node: caller-assigned id plus world position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub position: Vec2,
}

/// A directed edge with its Euclidean weight.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: EdgeId,
    pub origin: NodeId,
    pub destination: NodeId,
    pub weight: f32,
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── TileGraph ─────────────────────────────────────────────────────────────────

/// Directed graph in CSR format plus a spatial index for nearest-node lookup.
///
/// Immutable once built; share it between behaviors with `Arc<TileGraph>`.
/// Construct with [`TileGraphBuilder`] or [`WalkGrid::to_graph`][crate::WalkGrid::to_graph].
pub struct TileGraph {
    node_ids: Vec<NodeId>,
    node_pos: Vec<Vec2>,
    index: FxHashMap<NodeId, u32>,

    node_out_start: Vec<u32>,
    edge_from: Vec<u32>,
    edge_to: Vec<u32>,
    edge_weight: Vec<f32>,

    spatial_idx: RTree<NodeEntry>,
}

impl TileGraph {
    /// Construct an empty graph.  Every query against it reports
    /// [`GraphError::EmptyGraph`] or an unknown node.
    pub fn empty() -> Self {
        TileGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.dense_index(id).map(|i| self.node_at(i))
    }

    pub fn position(&self, id: NodeId) -> Option<Vec2> {
        self.dense_index(id).map(|i| self.node_pos[i])
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.node_count()).map(|i| self.node_at(i))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// The edge stored at `id`, or `None` if out of range.
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        (id.index() < self.edge_count()).then(|| self.edge_at(id.index()))
    }

    /// Edges leaving `id` paired with their destination node.
    ///
    /// Unknown ids yield an empty iterator.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (Edge, Node)> + '_ {
        let range = match self.dense_index(id) {
            Some(i) => self.out_range(i),
            None => 0..0,
        };
        range.map(|e| (self.edge_at(e), self.node_at(self.edge_to[e] as usize)))
    }

    /// Out-degree of `id` (zero for unknown ids).
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.dense_index(id).map_or(0, |i| self.out_range(i).len())
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node nearest to `point`; equidistant candidates resolve to the
    /// smallest id.
    pub fn closest_to(&self, point: Vec2) -> GraphResult<Node> {
        let query = [point.x, point.y];
        let mut candidates = self.spatial_idx.nearest_neighbor_iter(&query);
        let first = candidates.next().ok_or(GraphError::EmptyGraph)?;
        let best_d2 = first.distance_2(&query);
        let mut best = first.id;
        for entry in candidates {
            if entry.distance_2(&query) > best_d2 {
                break;
            }
            best = best.min(entry.id);
        }
        self.node(best).ok_or(GraphError::UnknownNode(best))
    }

    // ── Crate-internal dense access (used by the path search) ────────────

    #[inline]
    pub(crate) fn dense_index(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).map(|&i| i as usize)
    }

    #[inline]
    pub(crate) fn dense_position(&self, i: usize) -> Vec2 {
        self.node_pos[i]
    }

    #[inline]
    pub(crate) fn dense_id(&self, i: usize) -> NodeId {
        self.node_ids[i]
    }

    /// `(destination dense index, weight)` for every edge leaving dense node `i`.
    #[inline]
    pub(crate) fn dense_out(&self, i: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.out_range(i)
            .map(|e| (self.edge_to[e] as usize, self.edge_weight[e]))
    }

    #[inline]
    fn out_range(&self, i: usize) -> std::ops::Range<usize> {
        self.node_out_start[i] as usize..self.node_out_start[i + 1] as usize
    }

    #[inline]
    fn node_at(&self, i: usize) -> Node {
        Node { id: self.node_ids[i], position: self.node_pos[i] }
    }

    #[inline]
    fn edge_at(&self, e: usize) -> Edge {
        Edge {
            id:          EdgeId(e as u32),
            origin:      self.node_ids[self.edge_from[e] as usize],
            destination: self.node_ids[self.edge_to[e] as usize],
            weight:      self.edge_weight[e],
        }
    }
}

// ── TileGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`TileGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes must be added before the edges that reference them.  `build()`
/// collapses duplicate directed edges, sorts them into CSR order, and
/// bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use dpm_core::{NodeId, Vec2};
/// use dpm_graph::TileGraphBuilder;
///
/// let mut b = TileGraphBuilder::new();
/// b.add_node(NodeId(0), Vec2::new(0.0, 0.0)).unwrap();
/// b.add_node(NodeId(1), Vec2::new(3.0, 4.0)).unwrap();
/// b.add_double_edge(NodeId(0), NodeId(1)).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.neighbors(NodeId(0)).next().unwrap().0.weight, 5.0);
/// ```
pub struct TileGraphBuilder {
    nodes:     BTreeMap<NodeId, Vec2>,
    raw_edges: Vec<(NodeId, NodeId)>,
}

impl TileGraphBuilder {
    pub fn new() -> Self {
        Self { nodes: BTreeMap::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate edge storage when the edge count is known (grid loads).
    pub fn with_edge_capacity(edges: usize) -> Self {
        Self { nodes: BTreeMap::new(), raw_edges: Vec::with_capacity(edges) }
    }

    /// Add a node.  Fails if `id` was already added.
    pub fn add_node(&mut self, id: NodeId, position: Vec2) -> GraphResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.nodes.insert(id, position);
        Ok(())
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> GraphResult<()> {
        for id in [from, to] {
            if !self.nodes.contains_key(&id) {
                return Err(GraphError::UnknownNode(id));
            }
        }
        if from == to {
            return Err(GraphError::SelfLoop(from));
        }
        self.raw_edges.push((from, to));
        Ok(())
    }

    /// Add edges in **both directions** between `a` and `b`.
    pub fn add_double_edge(&mut self, a: NodeId, b: NodeId) -> GraphResult<()> {
        self.add_edge(a, b)?;
        self.add_edge(b, a)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`TileGraph`].
    pub fn build(self) -> TileGraph {
        let node_count = self.nodes.len();

        let mut node_ids = Vec::with_capacity(node_count);
        let mut node_pos = Vec::with_capacity(node_count);
        let mut index = FxHashMap::default();
        for (i, (&id, &pos)) in self.nodes.iter().enumerate() {
            node_ids.push(id);
            node_pos.push(pos);
            index.insert(id, i as u32);
        }

        // Ids sort the same way as dense indices, so this is CSR order.
        let mut raw = self.raw_edges;
        raw.sort_unstable();
        raw.dedup();

        let edge_from: Vec<u32> = raw.iter().map(|(f, _)| index[f]).collect();
        let edge_to:   Vec<u32> = raw.iter().map(|(_, t)| index[t]).collect();
        let edge_weight: Vec<f32> = edge_from
            .iter()
            .zip(&edge_to)
            .map(|(&f, &t)| node_pos[f as usize].distance(node_pos[t as usize]))
            .collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &f in &edge_from {
            node_out_start[f as usize + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_to.len());

        let entries: Vec<NodeEntry> = node_ids
            .iter()
            .zip(&node_pos)
            .map(|(&id, pos)| NodeEntry { point: [pos.x, pos.y], id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        TileGraph {
            node_ids,
            node_pos,
            index,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            spatial_idx,
        }
    }
}

impl Default for TileGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
