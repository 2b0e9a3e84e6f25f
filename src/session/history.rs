//! Undo/redo snapshots of hand-edited boards

use crate::game_of_life::Grid;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_SIZE: usize = 50;

/// Bounded linear undo history with a cursor.
///
/// Recording after an undo discards the redo tail.
#[derive(Debug, Clone)]
pub struct EditHistory {
    snapshots: VecDeque<Grid>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl EditHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Push a copy of `grid` as the newest snapshot
    pub fn record(&mut self, grid: &Grid) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push_back(grid.clone());

        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back, returning the snapshot to restore
    pub fn undo(&mut self) -> Option<&Grid> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.snapshots.get(c - 1)
            }
            _ => None,
        }
    }

    /// Step forward again after an undo
    pub fn redo(&mut self) -> Option<&Grid> {
        match self.cursor {
            Some(c) if c + 1 < self.snapshots.len() => {
                self.cursor = Some(c + 1);
                self.snapshots.get(c + 1)
            }
            _ => None,
        }
    }

    /// Rewind to the oldest snapshot
    pub fn rewind(&mut self) -> Option<&Grid> {
        if self.snapshots.is_empty() {
            return None;
        }
        self.cursor = Some(0);
        self.snapshots.front()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.snapshots.len())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(n: usize) -> Grid {
        let mut grid = Grid::new(1, 8).unwrap();
        grid.set_cell(0, n, true).unwrap();
        grid
    }

    #[test]
    fn test_undo_redo() {
        let mut history = EditHistory::new(10);
        assert!(history.undo().is_none());

        for n in 0..3 {
            history.record(&grid_with(n));
        }
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert_eq!(history.undo(), Some(&grid_with(1)));
        assert_eq!(history.undo(), Some(&grid_with(0)));
        assert!(history.undo().is_none());

        assert_eq!(history.redo(), Some(&grid_with(1)));
        assert!(history.can_redo());
    }

    #[test]
    fn test_record_truncates_redo_tail() {
        let mut history = EditHistory::new(10);
        for n in 0..4 {
            history.record(&grid_with(n));
        }
        history.undo();
        history.undo();

        history.record(&grid_with(7));
        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(&grid_with(1)));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = EditHistory::new(3);
        for n in 0..5 {
            history.record(&grid_with(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.rewind(), Some(&grid_with(2)));
    }

    #[test]
    fn test_snapshots_are_copies() {
        let mut history = EditHistory::default();
        let mut live = grid_with(0);
        history.record(&live);
        live.set_cell(0, 5, true).unwrap();
        history.record(&live);

        assert_eq!(history.undo(), Some(&grid_with(0)));
    }
}
