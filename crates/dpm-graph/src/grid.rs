//! Boolean walkability grid → 4-connected tile graph.
//!
//! Row 0 is the **top** row (the way floor plans are written and images are
//! stored); world `y` grows upward, so row 0 maps to the largest `y`.
//!
//! ```text
//! tile (col, row)  →  NodeId(row * cols + col)
//!                  →  centre (col * t + t/2, (rows - row - 1) * t + t/2)
//! ```

use dpm_core::{NodeId, Vec2};

use crate::graph::{TileGraph, TileGraphBuilder};
use crate::{GraphError, GraphResult};

/// Glyph marking a blocked tile in [`WalkGrid::from_ascii`].
pub const BLOCKED: char = '#';

/// A `cols × rows` grid of walkable / blocked tiles, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkGrid {
    cols:     usize,
    rows:     usize,
    walkable: Vec<bool>,
}

impl WalkGrid {
    /// Wrap a row-major walkability vector.
    pub fn new(cols: usize, rows: usize, walkable: Vec<bool>) -> GraphResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(GraphError::MalformedGrid(format!("empty {cols}x{rows} grid")));
        }
        if walkable.len() != cols * rows {
            return Err(GraphError::MalformedGrid(format!(
                "expected {} cells for {cols}x{rows}, got {}",
                cols * rows,
                walkable.len()
            )));
        }
        Ok(Self { cols, rows, walkable })
    }

    /// Build from a predicate over `(col, row)`.
    pub fn from_fn(
        cols: usize,
        rows: usize,
        mut is_walkable: impl FnMut(usize, usize) -> bool,
    ) -> GraphResult<Self> {
        let mut walkable = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                walkable.push(is_walkable(col, row));
            }
        }
        Self::new(cols, rows, walkable)
    }

    /// Parse an ASCII floor plan: `#` is blocked, any other glyph walkable.
    ///
    /// Leading/trailing blank lines and trailing whitespace are ignored; all
    /// remaining rows must have the same width.
    pub fn from_ascii(plan: &str) -> GraphResult<Self> {
        let lines: Vec<&str> = plan
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.is_empty())
            .collect();
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
        let lines = &lines[..end];

        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut walkable = Vec::with_capacity(cols * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(GraphError::MalformedGrid(format!(
                    "row {row} has width {width}, expected {cols}"
                )));
            }
            walkable.extend(line.chars().map(|c| c != BLOCKED));
        }
        Self::new(cols, lines.len(), walkable)
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }

    /// `false` for blocked or out-of-range tiles.
    pub fn is_walkable(&self, col: usize, row: usize) -> bool {
        self.in_range(col, row) && self.walkable[row * self.cols + col]
    }

    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|&&w| w).count()
    }

    fn in_range(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows
    }

    /// Node id of a tile; `None` outside the grid.
    pub fn tile_id(&self, col: usize, row: usize) -> Option<NodeId> {
        self.in_range(col, row).then(|| self.id_of(col, row))
    }

    /// World-space centre of a tile of side `tile_size`; `None` outside the
    /// grid.
    pub fn tile_center(&self, col: usize, row: usize, tile_size: f32) -> Option<Vec2> {
        self.in_range(col, row).then(|| self.center_of(col, row, tile_size))
    }

    // Callers guarantee `col < cols` and `row < rows`.
    #[inline]
    fn id_of(&self, col: usize, row: usize) -> NodeId {
        NodeId((row * self.cols + col) as u32)
    }

    fn center_of(&self, col: usize, row: usize, tile_size: f32) -> Vec2 {
        let half = tile_size * 0.5;
        Vec2::new(
            col as f32 * tile_size + half,
            (self.rows - row - 1) as f32 * tile_size + half,
        )
    }

    /// Build a graph with one node per walkable tile and double edges between
    /// horizontally or vertically adjacent walkable tiles.
    pub fn to_graph(&self, tile_size: f32) -> GraphResult<TileGraph> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(GraphError::MalformedGrid(format!("tile size {tile_size}")));
        }
        let mut b = TileGraphBuilder::with_edge_capacity(4 * self.walkable_count());
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.is_walkable(col, row) {
                    b.add_node(self.id_of(col, row), self.center_of(col, row, tile_size))?;
                }
            }
        }
        // Right and down neighbours only; add_double_edge covers the reverse.
        for row in 0..self.rows {
            for col in 0..self.cols {
                if !self.is_walkable(col, row) {
                    continue;
                }
                let here = self.id_of(col, row);
                if self.is_walkable(col + 1, row) {
                    b.add_double_edge(here, self.id_of(col + 1, row))?;
                }
                if self.is_walkable(col, row + 1) {
                    b.add_double_edge(here, self.id_of(col, row + 1))?;
                }
            }
        }
        Ok(b.build())
    }
}
