use crate::maze::GridSnapshot;

/// Grid snapshots, one per logged move, with a cursor for replaying them.
#[derive(Debug, Default, Clone)]
pub struct GridHistory {
    /// Snapshot `i` is the grid right after move `i`, oldest first.
    snapshots: Vec<GridSnapshot>,
    /// Current replay position. Always less than `snapshots.len()` unless the history is empty.
    replay_index: usize,
}

impl GridHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot taken after move number `move_number` (0-based).
    pub fn get(&self, move_number: usize) -> Option<&GridSnapshot> {
        self.snapshots.get(move_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridSnapshot> {
        self.snapshots.iter()
    }

    pub fn add_snapshot(&mut self, snapshot: GridSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.replay_index = 0;
    }

    /// Snapshot at the replay cursor.
    pub fn current(&self) -> Option<&GridSnapshot> {
        self.snapshots.get(self.replay_index)
    }

    pub fn replay_index(&self) -> usize {
        self.replay_index
    }

    /// Moves the cursor one move later. `None` if already at the latest move.
    pub fn step_forward(&mut self) -> Option<&GridSnapshot> {
        if self.replay_index + 1 >= self.snapshots.len() {
            None
        } else {
            self.replay_index += 1;
            self.snapshots.get(self.replay_index)
        }
    }

    /// Moves the cursor one move earlier. `None` if already at the first move.
    pub fn step_backward(&mut self) -> Option<&GridSnapshot> {
        match self.replay_index {
            0 => None,
            _ => {
                self.replay_index -= 1;
                self.snapshots.get(self.replay_index)
            }
        }
    }

    /// Puts the cursor back on the first move.
    pub fn rewind(&mut self) {
        self.replay_index = 0;
    }
}
