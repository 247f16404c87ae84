//! Graph and path-search error types.

use thiserror::Error;

use dpm_core::NodeId;

/// Errors raised while building or querying a [`TileGraph`][crate::TileGraph].
///
/// Construction errors are programming/configuration defects; callers are
/// expected to abort setup on them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("edge from {0} to itself")]
    SelfLoop(NodeId),

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("malformed walkability grid: {0}")]
    MalformedGrid(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Errors produced by a [`Pathfinder`][crate::Pathfinder].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("search gave up after expanding {limit} nodes")]
    ExpansionLimit { limit: usize },
}

pub type PathResult<T> = Result<T, PathError>;
