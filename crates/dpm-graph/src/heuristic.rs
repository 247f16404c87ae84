//! Distance estimates for the path search.
//!
//! A* only returns optimal paths when its heuristic is **admissible**: it
//! must never overestimate the true remaining cost.  Edge weights in a
//! [`TileGraph`][crate::TileGraph] are Euclidean distances, so [`Euclidean`]
//! is always admissible.

use dpm_core::Vec2;

/// Pluggable remaining-cost estimate between two node positions.
///
/// Implementations must be `Send + Sync` so a single heuristic can be shared
/// (behind an `Arc`) by every behavior that plans over the same graph.
pub trait Heuristic: Send + Sync {
    /// Non-negative estimate of the cost from `from` to `to`.
    fn estimate(&self, from: Vec2, to: Vec2) -> f32;
}

/// Straight-line distance.  The default, and admissible on any graph whose
/// edge weights are Euclidean lengths.
#[derive(Copy, Clone, Debug, Default)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    #[inline]
    fn estimate(&self, from: Vec2, to: Vec2) -> f32 {
        from.distance(to)
    }
}

/// `|dx| + |dy|`.  Admissible only when every edge is axis-aligned, as in the
/// 4-connected graphs produced by [`WalkGrid`][crate::WalkGrid]; it expands
/// fewer nodes there than [`Euclidean`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Vec2, to: Vec2) -> f32 {
        (to.x - from.x).abs() + (to.y - from.y).abs()
    }
}

/// Always zero: turns A* into Dijkstra's algorithm.
#[derive(Copy, Clone, Debug, Default)]
pub struct Zero;

impl Heuristic for Zero {
    #[inline]
    fn estimate(&self, _from: Vec2, _to: Vec2) -> f32 {
        0.0
    }
}
