pub mod cell;
pub mod config;
pub mod grid;

pub use cell::{Cell, CellType};
pub use config::{ConfigError, MazeConfig, MazeConfigPatch};
pub use grid::{Grid, GridSnapshot};

use crate::obstacles::{ObstacleSearch, Placement};

/// Grid position as `(x, y)`.
pub type Coord = (u16, u16);

impl Grid {
    /// Builds a fresh grid for `config`: marks the start and end cells, then lets
    /// `search` place the initial obstacles.
    ///
    /// Panics if the start or end coordinate lies outside the grid.
    pub fn build(config: &MazeConfig, search: &mut ObstacleSearch) -> (Grid, Placement) {
        let mut grid = Grid::new(config.size);
        grid.set(config.start, CellType::Start);
        grid.set(config.end, CellType::End);
        let placement = search.place(&mut grid, config.obstacle_count);
        (grid, placement)
    }

    /// The agent's cell, or the start cell before the first move.
    pub fn agent(&self) -> Option<Coord> {
        self.first_of_type(CellType::Agent)
            .or_else(|| self.first_of_type(CellType::Start))
    }

    /// The goal cell. `None` once the agent has stepped onto it.
    pub fn goal(&self) -> Option<Coord> {
        self.first_of_type(CellType::End)
    }

    fn first_of_type(&self, cell_type: CellType) -> Option<Coord> {
        self.cells()
            .find(|cell| cell.cell_type() == cell_type)
            .map(Cell::coord)
    }
}
