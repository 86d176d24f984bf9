use thiserror::Error;

use super::Coord;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Maze size must be at least 1")]
    ZeroSize,
    #[error("The {role} coordinate {coord:?} is outside a {size}x{size} maze")]
    OutOfBounds {
        role: &'static str,
        coord: Coord,
        size: u16,
    },
    #[error("Start and end must differ, both are {0:?}")]
    StartEqualsEnd(Coord),
    #[error("Requested {requested} obstacles but only {available} cells can be blocked")]
    InsufficientFreeCells { requested: usize, available: usize },
}

/// Parameters of a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    /// Side length of the square grid
    pub size: u16,
    pub start: Coord,
    pub end: Coord,
    /// How many blocking cells to place after every step
    pub obstacle_count: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            size: 5,
            start: (0, 0),
            end: (4, 4),
            obstacle_count: 2,
        }
    }
}

/// A partial [`MazeConfig`]. Unset fields keep their previous value on reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfigPatch {
    pub size: Option<u16>,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
    pub obstacle_count: Option<usize>,
}

impl From<MazeConfig> for MazeConfigPatch {
    fn from(config: MazeConfig) -> Self {
        MazeConfigPatch {
            size: Some(config.size),
            start: Some(config.start),
            end: Some(config.end),
            obstacle_count: Some(config.obstacle_count),
        }
    }
}

impl MazeConfig {
    /// Square maze with the start in the top left and the goal in the bottom right corner.
    ///
    /// Panics if `size` is 0.
    pub fn corner_to_corner(size: u16, obstacle_count: usize) -> Self {
        assert!(size > 0, "Maze size must be at least 1");
        MazeConfig {
            size,
            start: (0, 0),
            end: (size - 1, size - 1),
            obstacle_count,
        }
    }

    /// Applies the fields set in `patch` on top of `self`.
    pub fn merged(self, patch: MazeConfigPatch) -> Self {
        MazeConfig {
            size: patch.size.unwrap_or(self.size),
            start: patch.start.unwrap_or(self.start),
            end: patch.end.unwrap_or(self.end),
            obstacle_count: patch.obstacle_count.unwrap_or(self.obstacle_count),
        }
    }

    /// Number of cells that can be blocked while a shortest start-to-end route stays clear.
    pub fn blockable_cells(&self) -> usize {
        let total = self.size as usize * self.size as usize;
        let manhattan = self.start.0.abs_diff(self.end.0) as usize
            + self.start.1.abs_diff(self.end.1) as usize;
        total.saturating_sub(manhattan + 1)
    }

    /// Checks the invariants the core otherwise assumes the caller has enforced.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        for (role, coord) in [("start", self.start), ("end", self.end)] {
            if coord.0 >= self.size || coord.1 >= self.size {
                return Err(ConfigError::OutOfBounds {
                    role,
                    coord,
                    size: self.size,
                });
            }
        }
        if self.start == self.end {
            return Err(ConfigError::StartEqualsEnd(self.start));
        }
        let available = self.blockable_cells();
        if self.obstacle_count > available {
            return Err(ConfigError::InsufficientFreeCells {
                requested: self.obstacle_count,
                available,
            });
        }
        Ok(())
    }
}
