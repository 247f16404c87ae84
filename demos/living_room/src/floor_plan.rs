//! The living-room floor plan and the appliance positions on it.
//!
//! 40×40 tiles of 20 px (an 800×800 view).  World `y` grows upward, so the
//! first line of the plan is the top of the room.

use dpm_core::Vec2;
use dpm_graph::{GraphResult, TileGraph, WalkGrid};

/// Tile side in world units; twice the agent radius.
pub const TILE_SIZE: f32 = 20.0;

pub const FRIDGE:   Vec2 = Vec2::new(145.0, 600.0);
pub const TV:       Vec2 = Vec2::new(288.0, 450.0);
pub const TOILET:   Vec2 = Vec2::new(122.0, 410.0);
pub const BREAKER:  Vec2 = Vec2::new(121.0, 508.0);
pub const SAFEZONE: Vec2 = Vec2::new(600.0, 200.0);

/// `#` is wall or furniture, `.` is floor.
const PLAN: &str = "
########################################
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#...........######....#................#
#...........######....#................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#......................................#
#......................................#
#......................................#
#......................................#
#.....................#................#
##########....#########................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#..######.............#................#
#..######.............#................#
#.....................#................#
#.....................#................#
#...........................######.....#
#...........................######.....#
#...........................######.....#
#......................................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
#.....................#................#
########################################
";

/// Rasterise the plan into a 4-connected tile graph.
pub fn build_graph() -> GraphResult<TileGraph> {
    WalkGrid::from_ascii(PLAN)?.to_graph(TILE_SIZE)
}
