mod history;

pub use history::GridHistory;

use serde::{Deserialize, Serialize};

use crate::{
    maze::{CellType, ConfigError, Coord, Grid, MazeConfig, MazeConfigPatch},
    obstacles::{ObstacleSearch, SearchLimits},
    solvers::shortest_path,
};

/// One agent step: where the agent moved and which cells became obstacles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveLogEntry {
    pub moving_object_coordinates: Coord,
    pub blocking_object_coordinates: Vec<Coord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Grid built, no moves yet
    Initialized,
    InProgress,
    /// The agent stands on the former goal cell
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent moved one cell
    Moved(Coord),
    /// The agent moved onto the goal
    Finished(Coord),
    /// Nothing to do, the maze is already done
    AlreadyDone,
    /// The agent cannot move: there is no path to the goal, or an unvalidated config put
    /// start and end on the same cell. Obstacle placement never causes the former.
    Stuck,
}

/// A running maze: the live grid, the move log and a snapshot per move.
pub struct MazeState {
    config: MazeConfig,
    limits: SearchLimits,
    seed: Option<u64>,
    grid: Grid,
    search: ObstacleSearch,
    game_log: Vec<MoveLogEntry>,
    history: GridHistory,
    status: GameStatus,
}

impl MazeState {
    /// Builds a maze without validating `config`. Impossible obstacle counts degrade to
    /// turns with no obstacles.
    ///
    /// Panics if the start or end coordinate lies outside the grid.
    pub fn new(config: MazeConfig) -> Self {
        Self::with_search(config, SearchLimits::default(), None)
    }

    /// Like [`MazeState::new`] with explicit search limits and an optional RNG seed.
    pub fn with_search(config: MazeConfig, limits: SearchLimits, seed: Option<u64>) -> Self {
        let mut search = ObstacleSearch::new(limits, seed);
        let (grid, _) = Grid::build(&config, &mut search);
        tracing::info!("[game] Built maze {:?}", config);
        MazeState {
            config,
            limits,
            seed,
            grid,
            search,
            game_log: Vec::new(),
            history: GridHistory::new(),
            status: GameStatus::Initialized,
        }
    }

    /// Validates `config` first and fails instead of degrading.
    pub fn try_new(config: MazeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Rebuilds the maze from scratch, discarding the log and history. Fields left unset in
    /// `patch` keep their current value.
    pub fn reset(&mut self, patch: impl Into<MazeConfigPatch>) {
        let config = self.config.merged(patch.into());
        self.rebuild(config);
    }

    /// Validating variant of [`MazeState::reset`]. The current maze is kept on error.
    pub fn try_reset(&mut self, patch: impl Into<MazeConfigPatch>) -> Result<(), ConfigError> {
        let config = self.config.merged(patch.into());
        config.validate()?;
        self.rebuild(config);
        Ok(())
    }

    fn rebuild(&mut self, config: MazeConfig) {
        // A fresh engine per grid so the factorial table matches the new size
        let mut search = ObstacleSearch::new(self.limits, self.seed);
        let (grid, _) = Grid::build(&config, &mut search);
        tracing::info!("[game] Reset maze to {:?}", config);
        self.config = config;
        self.grid = grid;
        self.search = search;
        self.game_log.clear();
        self.history.clear();
        self.status = GameStatus::Initialized;
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn game_log(&self) -> &[MoveLogEntry] {
        &self.game_log
    }

    pub fn history(&self) -> &GridHistory {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the agent has reached the goal, i.e. no end cell is left.
    pub fn is_done(&self) -> bool {
        self.status == GameStatus::Done
    }

    /// The agent's cell, or the start cell before the first move.
    pub fn agent(&self) -> Coord {
        // Either an agent or a start cell is always present
        self.grid.agent().unwrap_or(self.config.start)
    }

    /// The goal cell, or the agent's cell once the goal is reached.
    pub fn goal(&self) -> Coord {
        self.grid.goal().unwrap_or_else(|| self.agent())
    }

    /// Moves the agent one cell along the shortest path, then re-randomizes the obstacles
    /// unless the goal was reached. Logs the move and snapshots the grid.
    pub fn advance_one_step(&mut self) -> StepOutcome {
        if self.is_done() {
            return StepOutcome::AlreadyDone;
        }

        let (agent, goal) = (self.agent(), self.goal());
        let path = shortest_path(&self.grid, agent, goal);
        if path.len() <= 1 {
            if agent == goal {
                // Only an unvalidated config with start == end gets here
                tracing::warn!("[game] Agent already stands on the goal cell {:?}", goal);
            } else {
                tracing::error!("[game] No path from {:?} to {:?}", agent, goal);
                debug_assert!(false, "Obstacle placement cut the agent off from the goal");
            }
            return StepOutcome::Stuck;
        }

        let next = path[1];
        self.grid.revert(agent);
        self.grid.set(next, CellType::Agent);

        let finished = self.grid.goal().is_none();
        let blocking = if finished {
            Vec::new()
        } else {
            self.search
                .place(&mut self.grid, self.config.obstacle_count)
                .cells
        };

        tracing::debug!(
            "[game] Agent moved {:?} -> {:?}, new obstacles {:?}",
            agent,
            next,
            blocking
        );
        self.game_log.push(MoveLogEntry {
            moving_object_coordinates: next,
            blocking_object_coordinates: blocking,
        });
        self.history.add_snapshot(self.grid.snapshot());

        if finished {
            tracing::info!(
                "[game] Goal reached at {:?} after {} moves",
                next,
                self.game_log.len()
            );
            self.status = GameStatus::Done;
            StepOutcome::Finished(next)
        } else {
            self.status = GameStatus::InProgress;
            StepOutcome::Moved(next)
        }
    }

    /// Steps until the goal is reached and returns the number of moves made.
    /// Stops early if the agent is ever stuck.
    pub fn run_to_completion(&mut self) -> usize {
        let mut moves = 0;
        loop {
            match self.advance_one_step() {
                StepOutcome::Moved(_) => moves += 1,
                StepOutcome::Finished(_) => return moves + 1,
                StepOutcome::AlreadyDone | StepOutcome::Stuck => return moves,
            }
        }
    }

    /// The move log as a JSON array.
    pub fn log_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.game_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::path_exists;

    fn seeded(config: MazeConfig, seed: u64) -> MazeState {
        MazeState::with_search(config, SearchLimits::default(), Some(seed))
    }

    #[test]
    fn test_obstacle_free_run() {
        let mut maze = seeded(MazeConfig::corner_to_corner(5, 0), 1);
        assert_eq!(shortest_path(maze.grid(), (0, 0), (4, 4)).len(), 9);
        assert_eq!(maze.status(), GameStatus::Initialized);

        assert_eq!(maze.run_to_completion(), 8);
        assert!(maze.is_done());
        assert_eq!(maze.agent(), (4, 4));
        assert!(maze.game_log().iter().all(|e| e.blocking_object_coordinates.is_empty()));
    }

    #[test]
    fn test_first_step_leaves_start() {
        let mut maze = seeded(MazeConfig::corner_to_corner(5, 2), 2);
        let outcome = maze.advance_one_step();
        let StepOutcome::Moved(next) = outcome else {
            panic!("unexpected outcome {:?}", outcome);
        };
        assert!(next == (1, 0) || next == (0, 1));
        assert_eq!(maze.grid().cell_type((0, 0)), CellType::Empty);
        assert_eq!(maze.grid().cell_type(next), CellType::Agent);
        assert_eq!(maze.status(), GameStatus::InProgress);
        assert_eq!(maze.game_log().len(), 1);
        assert_eq!(maze.history().len(), 1);
    }

    #[test]
    fn test_solvable_and_bounded_after_every_step() {
        let mut maze = seeded(MazeConfig::corner_to_corner(7, 6), 3);
        while !maze.is_done() {
            assert!(matches!(
                maze.advance_one_step(),
                StepOutcome::Moved(_) | StepOutcome::Finished(_)
            ));
            assert!(maze.grid().cells_of_type(CellType::Blocking).len() <= 6);
            if !maze.is_done() {
                assert!(path_exists(maze.grid(), maze.agent(), maze.goal()));
            }
        }
    }

    #[test]
    fn test_run_five_by_five_with_obstacles() {
        let mut maze = seeded(MazeConfig::corner_to_corner(5, 3), 4);
        maze.run_to_completion();

        assert!(maze.is_done());
        assert!(!maze.game_log().is_empty());
        assert_eq!(maze.game_log().len(), maze.history().len());
        for entry in maze.game_log() {
            let (x, y) = entry.moving_object_coordinates;
            assert!(x <= 4 && y <= 4);
            assert!(entry.blocking_object_coordinates.len() <= 3);
        }
        assert_eq!(
            maze.game_log().last().map(|e| e.moving_object_coordinates),
            Some((4, 4))
        );
        // The final move places nothing
        assert!(maze.game_log().last().is_some_and(|e| e.blocking_object_coordinates.is_empty()));
    }

    #[test]
    fn test_advance_after_done_is_noop() {
        let mut maze = seeded(MazeConfig::corner_to_corner(2, 0), 5);
        maze.run_to_completion();
        let log_len = maze.game_log().len();
        assert_eq!(maze.advance_one_step(), StepOutcome::AlreadyDone);
        assert_eq!(maze.game_log().len(), log_len);
        assert_eq!(maze.run_to_completion(), 0);
    }

    #[test]
    fn test_reset_discards_log_and_history() {
        let config = MazeConfig::corner_to_corner(5, 3);
        let mut maze = seeded(config, 6);
        maze.advance_one_step();
        maze.advance_one_step();

        maze.reset(config);
        assert!(maze.game_log().is_empty());
        assert!(maze.history().is_empty());
        assert_eq!(maze.status(), GameStatus::Initialized);

        maze.run_to_completion();
        maze.reset(config);
        assert!(maze.game_log().is_empty());
        assert!(!maze.is_done());
    }

    #[test]
    fn test_partial_reset_keeps_unset_fields() {
        let mut maze = seeded(MazeConfig::corner_to_corner(6, 2), 7);
        maze.reset(MazeConfigPatch {
            obstacle_count: Some(4),
            ..Default::default()
        });
        assert_eq!(maze.config().size, 6);
        assert_eq!(maze.config().end, (5, 5));
        assert_eq!(maze.config().obstacle_count, 4);
        assert_eq!(maze.grid().size(), 6);
        assert_eq!(maze.grid().cells_of_type(CellType::Blocking).len(), 4);
    }

    #[test]
    fn test_impossible_obstacle_count_degrades() {
        // From the start corner of a 3x3 grid at most 4 cells can be blocked
        let mut maze = seeded(MazeConfig::corner_to_corner(3, 5), 8);
        assert!(maze.grid().cells_of_type(CellType::Blocking).is_empty());
        assert_eq!(maze.grid().cells_of_type(CellType::End), vec![(2, 2)]);

        maze.run_to_completion();
        assert!(maze.is_done());
        assert!(
            maze.game_log()
                .iter()
                .all(|e| e.blocking_object_coordinates.len() <= 5)
        );
    }

    #[test]
    fn test_infeasible_count_on_large_grid_finishes() {
        // Far more obstacles than a 10x10 grid can hold while keeping a route
        let mut maze = seeded(MazeConfig::corner_to_corner(10, 85), 11);
        assert!(maze.grid().cells_of_type(CellType::Blocking).is_empty());

        assert_eq!(maze.run_to_completion(), 18);
        assert!(maze.is_done());
        assert!(
            maze.game_log()
                .iter()
                .all(|e| e.blocking_object_coordinates.is_empty())
        );
    }

    #[test]
    fn test_start_equal_to_end_does_not_move() {
        let config = MazeConfig {
            size: 4,
            start: (1, 1),
            end: (1, 1),
            obstacle_count: 2,
        };
        let mut maze = seeded(config, 12);
        assert_eq!(maze.advance_one_step(), StepOutcome::Stuck);
        assert!(maze.game_log().is_empty());
        assert!(maze.history().is_empty());
        assert_eq!(maze.run_to_completion(), 0);
        assert_eq!(maze.status(), GameStatus::Initialized);
    }

    #[test]
    fn test_fail_fast_constructors() {
        assert_eq!(
            MazeState::try_new(MazeConfig::corner_to_corner(3, 5)).err(),
            Some(ConfigError::InsufficientFreeCells {
                requested: 5,
                available: 4
            })
        );

        let mut maze = MazeState::try_new(MazeConfig::corner_to_corner(3, 1)).unwrap();
        let err = maze.try_reset(MazeConfigPatch {
            end: Some((0, 0)),
            ..Default::default()
        });
        assert_eq!(err, Err(ConfigError::StartEqualsEnd((0, 0))));
        // The previous configuration survives a rejected reset
        assert_eq!(maze.config().end, (2, 2));
    }

    #[test]
    fn test_history_snapshots_are_independent() {
        let mut maze = seeded(MazeConfig::corner_to_corner(6, 4), 9);
        maze.run_to_completion();

        for (i, entry) in maze.game_log().iter().enumerate() {
            let snapshot = maze.history().get(i).unwrap();
            assert_eq!(snapshot.agent(), Some(entry.moving_object_coordinates));
            for &coord in &entry.blocking_object_coordinates {
                assert_eq!(snapshot.cell_type(coord), CellType::Blocking);
            }
            assert!(snapshot.count(CellType::Blocking) <= 4);
        }
        assert!(maze.history().get(0).unwrap().goal().is_some());
        assert!(maze.history().iter().last().unwrap().goal().is_none());
    }

    #[test]
    fn test_log_json_format() {
        let mut maze = seeded(MazeConfig::corner_to_corner(2, 0), 10);
        maze.run_to_completion();
        let json = maze.log_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["movingObjectCoordinates"], serde_json::json!([1, 1]));
        assert_eq!(entries[1]["blockingObjectCoordinates"], serde_json::json!([]));

        let roundtrip: Vec<MoveLogEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, maze.game_log());
    }
}
