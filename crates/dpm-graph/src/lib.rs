//! `dpm-graph` — tile graph, spatial indexing, and path search.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`graph`]     | `TileGraph` (CSR + R-tree), `TileGraphBuilder`, `Node`, `Edge` |
//! | [`grid`]      | `WalkGrid` — boolean walkability grid → 4-connected graph   |
//! | [`heuristic`] | `Heuristic` trait, `Euclidean`, `Manhattan`, `Zero`         |
//! | [`astar`]     | `Pathfinder` trait, `Path`, `AStar`                         |
//! | [`error`]     | `GraphError`, `PathError`, result aliases                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod astar;
pub mod error;
pub mod graph;
pub mod grid;
pub mod heuristic;


pub use astar::{AStar, Path, Pathfinder};
pub use error::{GraphError, GraphResult, PathError, PathResult};
pub use graph::{Edge, Node, TileGraph, TileGraphBuilder};
pub use grid::WalkGrid;
pub use heuristic::{Euclidean, Heuristic, Manhattan, Zero};
