use std::collections::VecDeque;

use crate::foundation::core::GridPoint;

/// Fixed-capacity FIFO of a pathfinder's most recent points.
///
/// Pushing past capacity evicts the oldest point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryQueue {
    points: VecDeque<GridPoint>,
    capacity: usize,
}

impl HistoryQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: GridPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// `index >= 0` counts from the oldest point, `index < 0` from the newest (`-1` is the
    /// most recent).
    pub fn get(&self, index: isize) -> Option<GridPoint> {
        let slot = if index >= 0 {
            index.unsigned_abs()
        } else {
            self.points.len().checked_sub(index.unsigned_abs())?
        };
        self.points.get(slot).copied()
    }

    /// Matches on position only; brightness is ignored.
    pub fn contains(&self, point: GridPoint) -> bool {
        self.points.iter().any(|p| p.same_cell(point))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridPoint> {
        self.points.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/history.rs"]
mod tests;
