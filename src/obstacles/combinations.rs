/// Resumable cursor over all `k`-element index combinations of `0..n`, in lexicographic order.
///
/// Yields the same sequence as a depth-first backtracking walk, but keeps its position
/// between calls so enumeration can be paused and picked up again.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    state: CursorState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CursorState {
    Fresh,
    Active,
    Done,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let state = if k > n {
            CursorState::Done
        } else {
            CursorState::Fresh
        };
        Combinations {
            n,
            indices: (0..k).collect(),
            state,
        }
    }

    /// Whether another combination remains.
    pub fn has_next(&self) -> bool {
        match self.state {
            CursorState::Fresh => true,
            CursorState::Done => false,
            CursorState::Active => {
                let k = self.indices.len();
                // Exhausted once every index sits at its highest possible value
                (0..k).any(|i| self.indices[i] != self.n - k + i)
            }
        }
    }

    /// Moves `indices` to the next combination. Returns `false` when none is left.
    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        // Rightmost index that can still be incremented
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != self.n - k + i) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            CursorState::Done => return None,
            CursorState::Fresh => self.state = CursorState::Active,
            CursorState::Active => {
                if !self.advance() {
                    self.state = CursorState::Done;
                    return None;
                }
            }
        }
        Some(self.indices.clone())
    }
}
