use std::collections::{HashMap, HashSet, VecDeque};

use crate::maze::{Coord, Grid};

/// Shortest 4-connected path from `from` to `to`, both ends included, avoiding blocking cells.
/// Returns an empty path if `to` cannot be reached.
pub fn shortest_path(grid: &Grid, from: Coord, to: Coord) -> Vec<Coord> {
    let mut frontier = VecDeque::from([from]);
    let mut visited = HashSet::from([from]);
    // Maps each discovered cell to the cell it was first reached from
    let mut parents: HashMap<Coord, Coord> = HashMap::new();

    while let Some(current) = frontier.pop_front() {
        if current == to {
            let mut path = vec![current];
            let mut child = current;
            while let Some(&parent) = parents.get(&child) {
                path.push(parent);
                child = parent;
            }
            path.reverse();
            return path;
        }

        for neighbor in grid.neighbors(current) {
            if visited.insert(neighbor) {
                parents.insert(neighbor, current);
                frontier.push_back(neighbor);
            }
        }
    }

    Vec::new()
}
