//! Path search trait and the default A* implementation.
//!
//! # Pluggability
//!
//! Steering behaviors plan through the [`Pathfinder`] trait, so applications
//! can swap in another search without touching the behaviors.  Heuristics
//! are passed per call as `&dyn Heuristic`.
//!
//! # Determinism
//!
//! The open frontier is ordered by `(f, h, NodeId)`: lowest `f = g + h`
//! first, then the node closer to the goal by estimate, then the smaller id.
//! Neighbour iteration follows the CSR order, which is itself sorted by id,
//! so identical inputs always produce the identical node sequence.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use dpm_core::{NodeId, Vec2};
use tracing::debug;

use crate::graph::TileGraph;
use crate::heuristic::Heuristic;
use crate::{PathError, PathResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a path query: nodes from start to goal inclusive, their
/// positions, and the summed edge weight.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub points: Vec<Vec2>,
    pub cost: f32,
}

impl Path {
    /// A path with no nodes.  Followers treat it as "stop".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path search over a [`TileGraph`].
pub trait Pathfinder: Send + Sync {
    /// Compute a minimum-cost path from `start` to `goal`.
    ///
    /// `start == goal` yields a single-node path of cost zero.
    fn find_path(
        &self,
        graph:     &TileGraph,
        start:     NodeId,
        goal:      NodeId,
        heuristic: &dyn Heuristic,
    ) -> PathResult<Path>;
}

// ── AStar ─────────────────────────────────────────────────────────────────────

/// Best-first search on `f = g + h`.
///
/// Optionally capped at `max_expansions` closed nodes; exceeding the cap
/// fails with [`PathError::ExpansionLimit`] so a per-frame caller can fall
/// back to "no steering" instead of stalling the frame.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar {
    max_expansions: Option<usize>,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expansion_limit(limit: usize) -> Self {
        Self { max_expansions: Some(limit) }
    }

    pub fn expansion_limit(&self) -> Option<usize> {
        self.max_expansions
    }
}

impl Pathfinder for AStar {
    fn find_path(
        &self,
        graph:     &TileGraph,
        start:     NodeId,
        goal:      NodeId,
        heuristic: &dyn Heuristic,
    ) -> PathResult<Path> {
        astar(graph, start, goal, heuristic, self.max_expansions)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Open-frontier entry.  Ordered ascending by `(f, h, node)`; wrap in
/// `Reverse` to pop the minimum from `BinaryHeap`.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    f:     f32,
    h:     f32,
    node:  NodeId,
    index: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.h.total_cmp(&other.h))
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

const NO_PARENT: usize = usize::MAX;

fn astar(
    graph:     &TileGraph,
    start:     NodeId,
    goal:      NodeId,
    heuristic: &dyn Heuristic,
    limit:     Option<usize>,
) -> PathResult<Path> {
    let start_ix = graph.dense_index(start).ok_or(PathError::UnknownNode(start))?;
    let goal_ix  = graph.dense_index(goal).ok_or(PathError::UnknownNode(goal))?;
    let goal_pos = graph.dense_position(goal_ix);

    if start_ix == goal_ix {
        return Ok(Path { nodes: vec![start], points: vec![goal_pos], cost: 0.0 });
    }

    let n = graph.node_count();
    // g[v] = best known cost from start to v.
    let mut g      = vec![f32::INFINITY; n];
    let mut parent = vec![NO_PARENT; n];
    let mut closed = vec![false; n];

    g[start_ix] = 0.0;
    let h0 = heuristic.estimate(graph.dense_position(start_ix), goal_pos);
    let mut open = BinaryHeap::new();
    open.push(Reverse(Frontier { f: h0, h: h0, node: start, index: start_ix }));

    let mut expanded = 0usize;
    while let Some(Reverse(current)) = open.pop() {
        let cur = current.index;
        // Stale duplicate of an already finalized node.
        if closed[cur] {
            continue;
        }
        if cur == goal_ix {
            let path = reconstruct(graph, &parent, goal_ix, g[goal_ix]);
            debug!(%start, %goal, expanded, cost = path.cost, hops = path.hops(), "a* path found");
            return Ok(path);
        }

        closed[cur] = true;
        expanded += 1;
        if let Some(max) = limit {
            if expanded > max {
                debug!(%start, %goal, max, "a* expansion limit reached");
                return Err(PathError::ExpansionLimit { limit: max });
            }
        }

        for (next, weight) in graph.dense_out(cur) {
            if closed[next] {
                continue;
            }
            let tentative = g[cur] + weight;
            if tentative < g[next] {
                g[next] = tentative;
                parent[next] = cur;
                let h = heuristic.estimate(graph.dense_position(next), goal_pos);
                open.push(Reverse(Frontier {
                    f:     tentative + h,
                    h,
                    node:  graph.dense_id(next),
                    index: next,
                }));
            }
        }
    }

    debug!(%start, %goal, expanded, "a* frontier exhausted");
    Err(PathError::NoPath { from: start, to: goal })
}

fn reconstruct(graph: &TileGraph, parent: &[usize], goal_ix: usize, cost: f32) -> Path {
    let mut indices = vec![goal_ix];
    let mut cur = goal_ix;
    while parent[cur] != NO_PARENT {
        cur = parent[cur];
        indices.push(cur);
    }
    indices.reverse();
    Path {
        nodes:  indices.iter().map(|&i| graph.dense_id(i)).collect(),
        points: indices.iter().map(|&i| graph.dense_position(i)).collect(),
        cost,
    }
}
