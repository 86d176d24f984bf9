use std::fmt;

use super::Coord;
use super::cell::{Cell, CellType};

/// Square N×N grid of cells, indexed by `(x, y)`.
#[derive(Debug, Clone)]
pub struct Grid {
    data: Box<[Cell]>,
    size: u16,
}

impl Grid {
    /// Allocates a grid of empty cells.
    pub fn new(size: u16) -> Self {
        let data = (0..size)
            .flat_map(|y| (0..size).map(move |x| Cell::new((x, y))))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Grid { data, size }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.size && coord.1 < self.size
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        if !self.is_in_bounds(coord) {
            panic!(
                "Coordinate {:?} is out of bounds for a grid of size {}",
                coord, self.size
            );
        }
        coord.1 as usize * self.size as usize + coord.0 as usize
    }

    pub fn cell_type(&self, coord: Coord) -> CellType {
        self[coord].cell_type()
    }

    /// Changes the type of the cell at `coord`, remembering its previous type.
    pub fn set(&mut self, coord: Coord, cell_type: CellType) {
        let idx = self.ravel_index(coord);
        self.data[idx].set_type(cell_type);
    }

    /// Rolls the cell at `coord` back to its previous type.
    pub fn revert(&mut self, coord: Coord) {
        let idx = self.ravel_index(coord);
        self.data[idx].revert();
    }

    /// Cells in row-major scan order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.data.iter()
    }

    /// All coordinates currently carrying `cell_type`, in scan order.
    pub fn cells_of_type(&self, cell_type: CellType) -> Vec<Coord> {
        self.data
            .iter()
            .filter(|cell| cell.cell_type() == cell_type)
            .map(Cell::coord)
            .collect()
    }

    /// In-bounds, non-blocking neighbors in West, East, North, South order.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let (x, y) = coord;
        [
            // NOTE: wrapping_sub turns -1 into u16::MAX, and saturating_add caps at u16::MAX.
            // Both land out of bounds since the largest index is at most u16::MAX - 1.
            (x.wrapping_sub(1), y),
            (x.saturating_add(1), y),
            (x, y.wrapping_sub(1)),
            (x, y.saturating_add(1)),
        ]
        .into_iter()
        .filter(move |&c| self.is_in_bounds(c) && self[c].cell_type() != CellType::Blocking)
    }

    /// Deep copy of the cell types for history and rendering.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.size,
            cells: self.data.iter().map(Cell::cell_type).collect(),
        }
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                write!(f, "{}", self[(x, y)].cell_type())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Immutable copy of a grid's cell types. Shares nothing with the live grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    size: u16,
    cells: Box<[CellType]>,
}

impl GridSnapshot {
    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn cell_type(&self, coord: Coord) -> CellType {
        assert!(
            coord.0 < self.size && coord.1 < self.size,
            "Coordinate {:?} is out of bounds for a snapshot of size {}",
            coord,
            self.size
        );
        self.cells[coord.1 as usize * self.size as usize + coord.0 as usize]
    }

    pub fn count(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell_type).count()
    }

    /// Location of the agent, or of the start cell before the first move.
    pub fn agent(&self) -> Option<Coord> {
        self.position_of(CellType::Agent)
            .or_else(|| self.position_of(CellType::Start))
    }

    /// Location of the goal, `None` once the agent has reached it.
    pub fn goal(&self) -> Option<Coord> {
        self.position_of(CellType::End)
    }

    fn position_of(&self, cell_type: CellType) -> Option<Coord> {
        self.cells
            .iter()
            .position(|&c| c == cell_type)
            .map(|idx| {
                let size = self.size as usize;
                ((idx % size) as u16, (idx / size) as u16)
            })
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                write!(f, "{}", self.cell_type((x, y)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
