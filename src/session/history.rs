//! Bounded undo history.

use im::Vector;

use crate::core::GameState;

/// Checkpoints kept by default.
pub const HISTORY_CAPACITY: usize = 10;

/// Most recent game states, oldest dropped first.
///
/// States share structure through `im`, so a checkpoint costs O(1).
#[derive(Clone, Debug)]
pub struct History {
    entries: Vector<GameState>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    /// Remember `state`, dropping the oldest entry when full.
    pub fn checkpoint(&mut self, state: &GameState) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back(state.clone());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Take the most recent checkpoint.
    pub fn undo(&mut self) -> Option<GameState> {
        self.entries.pop_back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
