//! Path following with an on-demand planned route to a fixed destination.
//!
//! # Route cache
//!
//! The route is keyed by `(start node, goal node)`, where the start is the
//! graph node nearest the agent.  The goal never changes after
//! construction, so a replan happens exactly when the agent's nearest node
//! changes.  A failed search is cached the same way: the agent idles until
//! it is moved onto a different node rather than re-running a doomed search
//! every tick.

use std::fmt;
use std::sync::Arc;

use dpm_core::{NodeId, Vec2};
use dpm_graph::{AStar, Euclidean, Heuristic, PathError, Pathfinder, TileGraph};
use tracing::{debug, warn};

use crate::{FollowPath, Kinematic, SteeringConfig, SteeringOutput, SteeringResult};

/// Navigates to `destination` over a shared [`TileGraph`].
#[derive(Clone)]
pub struct PathTo {
    graph:       Arc<TileGraph>,
    destination: Vec2,
    goal:        NodeId,
    heuristic:   Arc<dyn Heuristic>,
    pathfinder:  Arc<dyn Pathfinder>,
    follow:      FollowPath,
    /// `(start, goal)` the current route was planned for.
    route:       Option<(NodeId, NodeId)>,
    replans:     u64,
}

impl PathTo {
    /// Plan with [`AStar`] and the [`Euclidean`] heuristic.
    ///
    /// Fails when `config` is invalid or the graph has no nodes.
    pub fn new(graph: Arc<TileGraph>, destination: Vec2, config: SteeringConfig) -> SteeringResult<Self> {
        let follow = FollowPath::new(config)?;
        let goal = graph.closest_to(destination)?.id;
        Ok(Self {
            graph,
            destination,
            goal,
            heuristic: Arc::new(Euclidean),
            pathfinder: Arc::new(AStar::new()),
            follow,
            route: None,
            replans: 0,
        })
    }

    pub fn with_heuristic(mut self, heuristic: Arc<dyn Heuristic>) -> Self {
        self.heuristic = heuristic;
        self.invalidate();
        self
    }

    pub fn with_pathfinder(mut self, pathfinder: Arc<dyn Pathfinder>) -> Self {
        self.pathfinder = pathfinder;
        self.invalidate();
        self
    }

    pub fn config(&self) -> &SteeringConfig {
        self.follow.config()
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    /// The graph node nearest the destination.
    pub fn goal(&self) -> NodeId {
        self.goal
    }

    /// `(start, goal)` of the cached route, if one has been planned.
    pub fn route(&self) -> Option<(NodeId, NodeId)> {
        self.route
    }

    /// Waypoints of the cached route; empty when no path was found.
    pub fn waypoints(&self) -> &[Vec2] {
        self.follow.points()
    }

    /// Number of searches run so far.
    pub fn replans(&self) -> u64 {
        self.replans
    }

    /// Drop the cached route so the next query replans.
    pub fn invalidate(&mut self) {
        self.route = None;
        self.follow.clear();
    }

    pub fn get_steering(&mut self, agent: &Kinematic) -> SteeringOutput {
        let start = match self.graph.closest_to(agent.position) {
            Ok(node) => node.id,
            Err(e) => {
                warn!(error = %e, "path-to could not locate the agent on the graph");
                return SteeringOutput::ZERO;
            }
        };
        if self.route != Some((start, self.goal)) {
            self.replan(start);
        }
        self.follow.get_steering(agent)
    }

    fn replan(&mut self, start: NodeId) {
        self.replans += 1;
        self.route = Some((start, self.goal));
        match self.pathfinder.find_path(&self.graph, start, self.goal, self.heuristic.as_ref()) {
            Ok(path) => {
                debug!(%start, goal = %self.goal, hops = path.hops(), cost = path.cost, "path-to replanned");
                self.follow.set_path(&path);
            }
            Err(PathError::NoPath { .. }) => {
                debug!(%start, goal = %self.goal, "path-to found no path; idling");
                self.follow.clear();
            }
            Err(e) => {
                warn!(%start, goal = %self.goal, error = %e, "path-to search failed; idling");
                self.follow.clear();
            }
        }
    }
}

impl fmt::Debug for PathTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathTo")
            .field("destination", &self.destination)
            .field("goal", &self.goal)
            .field("route", &self.route)
            .field("replans", &self.replans)
            .finish_non_exhaustive()
    }
}
