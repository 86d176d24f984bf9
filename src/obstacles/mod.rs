use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod binomial;
mod combinations;

pub use binomial::Factorials;
pub use combinations::Combinations;

use crate::maze::{CellType, Coord, Grid};
use crate::solvers::{path_exists, shortest_path};

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Thresholds at which the search switches strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Consecutive random draws that may hit already tried combinations before
    /// switching to exhaustive enumeration
    pub random_draws_before_enumeration: usize,
    /// Once more combinations than this have been tried, the current shortest path
    /// is taken out of the candidate pool
    pub tried_before_path_reservation: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            random_draws_before_enumeration: 10_000,
            tried_before_path_reservation: 100_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing was requested
    Skipped,
    /// A combination was committed to the grid
    Placed,
    /// Every combination was tried and each one cut off the goal
    Exhausted,
}

/// Result of one obstacle search.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Newly blocked cells, sorted. Empty unless the outcome is `Placed`.
    pub cells: Vec<Coord>,
    /// Number of distinct combinations validated against the grid
    pub attempts: usize,
    pub outcome: SearchOutcome,
}

impl Placement {
    fn empty(attempts: usize, outcome: SearchOutcome) -> Self {
        Placement {
            cells: Vec::new(),
            attempts,
            outcome,
        }
    }
}

/// Picks blocking cells that never cut the agent off from the goal.
///
/// Candidates come from random sampling first. When sampling keeps hitting combinations
/// that were already tried, the search walks all combinations in lexicographic order
/// instead. On very large searches the current shortest path is kept out of the pool,
/// which guarantees the next candidate is valid.
pub struct ObstacleSearch {
    limits: SearchLimits,
    rng: StdRng,
    factorials: Factorials,
}

impl ObstacleSearch {
    pub fn new(limits: SearchLimits, seed: Option<u64>) -> Self {
        ObstacleSearch {
            limits,
            rng: get_rng(seed),
            factorials: Factorials::new(),
        }
    }

    /// Clears the previous obstacles and blocks `count` free cells, keeping a path
    /// from the agent (or start) to the goal.
    ///
    /// The grid is left unchanged apart from the cleared obstacles when no valid
    /// combination exists.
    pub fn place(&mut self, grid: &mut Grid, count: usize) -> Placement {
        if count == 0 {
            return Placement::empty(0, SearchOutcome::Skipped);
        }
        let (Some(agent), Some(goal)) = (grid.agent(), grid.goal()) else {
            tracing::warn!("[search] No agent or goal on the grid, skipping obstacle placement");
            return Placement::empty(0, SearchOutcome::Skipped);
        };

        grid.cells_of_type(CellType::Blocking)
            .into_iter()
            .for_each(|coord| grid.set(coord, CellType::Empty));

        let pool = grid.cells_of_type(CellType::Empty);
        // Any valid placement keeps the interior of some route free, and no route is shorter
        // than the current shortest path. With no obstacles left that path always exists.
        let route_len = shortest_path(grid, agent, goal).len();
        if pool.len() + 2 < route_len + count {
            tracing::warn!(
                "[search] {} obstacles cannot fit among {} free cells with a route of {} cells, placing none",
                count,
                pool.len(),
                route_len
            );
            return Placement::empty(0, SearchOutcome::Exhausted);
        }

        let ceiling = self.factorials.binomial(pool.len(), count);
        tracing::debug!(
            "[search] Choosing {} of {} free cells, {} combinations",
            count,
            pool.len(),
            ceiling
        );

        let mut run = SearchRun {
            count,
            pool,
            tier: Tier::Random,
            tried: HashSet::new(),
            // None when the ceiling does not even fit in usize, so it is never reached
            ceiling: usize::try_from(&ceiling).ok(),
            reserved: false,
        };
        let mut attempts = 0;

        while !run.is_exhausted() {
            if !run.reserved && run.tried.len() > self.limits.tried_before_path_reservation {
                run.reserve_path(grid, agent, goal);
            }
            let Some(candidate) = run.next_candidate(&mut self.rng, &self.limits) else {
                break;
            };
            attempts += 1;

            candidate
                .iter()
                .for_each(|&coord| grid.set(coord, CellType::Blocking));
            let inserted = run.tried.insert(candidate.clone().into_boxed_slice());
            debug_assert!(inserted, "Combination {:?} was tried twice", candidate);

            if path_exists(grid, agent, goal) {
                tracing::debug!(
                    "[search] Placed {:?} after {} attempts",
                    candidate,
                    attempts
                );
                return Placement {
                    cells: candidate,
                    attempts,
                    outcome: SearchOutcome::Placed,
                };
            }
            candidate.iter().for_each(|&coord| grid.revert(coord));
        }

        tracing::warn!(
            "[search] All {} combinations of {} obstacles cut off the goal, placing none",
            attempts,
            count
        );
        Placement::empty(attempts, SearchOutcome::Exhausted)
    }
}

enum Tier {
    Random,
    Enumerate(Combinations),
}

/// State of a single `place` call.
struct SearchRun {
    count: usize,
    /// Cells that may be blocked, in grid scan order
    pool: Vec<Coord>,
    tier: Tier,
    /// Fingerprints (sorted cell lists) of every validated combination
    tried: HashSet<Box<[Coord]>>,
    ceiling: Option<usize>,
    reserved: bool,
}

impl SearchRun {
    fn is_exhausted(&self) -> bool {
        self.ceiling.is_some_and(|ceiling| self.tried.len() >= ceiling)
    }

    /// Draws `count` distinct cells by removing random entries from a shrinking index pool.
    fn draw_random(&self, rng: &mut StdRng) -> Vec<Coord> {
        let mut indices = (0..self.pool.len()).collect::<Vec<_>>();
        let mut combination = Vec::with_capacity(self.count);
        while combination.len() < self.count {
            let idx = rng.random_range(0..indices.len());
            combination.push(self.pool[indices.swap_remove(idx)]);
        }
        combination.sort_unstable();
        combination
    }

    fn next_candidate(&mut self, rng: &mut StdRng, limits: &SearchLimits) -> Option<Vec<Coord>> {
        if matches!(self.tier, Tier::Random) {
            for _ in 0..limits.random_draws_before_enumeration {
                let combination = self.draw_random(rng);
                if !self.tried.contains(combination.as_slice()) {
                    return Some(combination);
                }
            }
            tracing::debug!(
                "[search] {} random draws were all tried before, enumerating combinations",
                limits.random_draws_before_enumeration
            );
            self.tier = Tier::Enumerate(Combinations::new(self.pool.len(), self.count));
        }

        if let Tier::Enumerate(cursor) = &mut self.tier {
            for indices in cursor.by_ref() {
                let mut combination = indices.iter().map(|&i| self.pool[i]).collect::<Vec<_>>();
                combination.sort_unstable();
                if !self.tried.contains(combination.as_slice()) {
                    return Some(combination);
                }
            }
        }
        None
    }

    /// Removes the current shortest path from the pool, so every later candidate leaves it open.
    /// Keeps the full pool if too few cells would remain.
    fn reserve_path(&mut self, grid: &Grid, agent: Coord, goal: Coord) {
        self.reserved = true;
        let path = shortest_path(grid, agent, goal)
            .into_iter()
            .collect::<HashSet<_>>();
        let pool = self
            .pool
            .iter()
            .copied()
            .filter(|coord| !path.contains(coord))
            .collect::<Vec<_>>();
        if pool.len() < self.count {
            tracing::debug!("[search] Too few cells off the path to reserve it");
            return;
        }
        tracing::info!(
            "[search] {} combinations tried, reserving a path of {} cells",
            self.tried.len(),
            path.len()
        );
        self.pool = pool;
        self.tier = Tier::Random;
    }
}
