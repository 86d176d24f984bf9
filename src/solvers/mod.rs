mod bfs;

pub use bfs::shortest_path;

use crate::maze::{Coord, Grid};

/// Whether any path from `from` to `to` avoids the blocking cells.
pub fn path_exists(grid: &Grid, from: Coord, to: Coord) -> bool {
    !shortest_path(grid, from, to).is_empty()
}
