use crossterm::style::{Color, Stylize};

use std::fmt;

use super::Coord;

/// What currently occupies a grid position.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    /// A free cell that can be walked on or turned into an obstacle.
    #[default]
    Empty,
    /// An obstacle. The agent cannot pass through it.
    Blocking,
    /// The starting cell, until the agent first moves away from it.
    Start,
    /// The goal. Disappears once the agent steps onto it.
    End,
    /// The moving agent.
    Agent,
}

impl CellType {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            CellType::Empty => "  ".with(Color::Reset),
            CellType::Blocking => "⬜".with(Color::White),
            CellType::Start => "🟩".with(Color::Green),
            CellType::End => "🟥".with(Color::Red),
            CellType::Agent => "🟡".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                CellType::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// A single grid position. The coordinate never changes; the type can be changed
/// and rolled back by exactly one level.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: Coord,
    current: CellType,
    previous: CellType,
}

impl Cell {
    pub fn new(coord: Coord) -> Self {
        Cell {
            coord,
            current: CellType::Empty,
            previous: CellType::Empty,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn cell_type(&self) -> CellType {
        self.current
    }

    pub fn previous_type(&self) -> CellType {
        self.previous
    }

    /// Changes the type, remembering the old one for [`Cell::revert`].
    pub fn set_type(&mut self, cell_type: CellType) {
        self.previous = self.current;
        self.current = cell_type;
    }

    /// Restores the type held before the last [`Cell::set_type`].
    /// Calling it twice in a row is a no-op the second time.
    pub fn revert(&mut self) {
        self.current = self.previous;
    }
}
