//! Generation-by-generation simulation engine

use super::{GameOfLifeRules, Grid};
use crate::error::{LifeError, Result};

/// Owns the seed, current and previous boards and advances them.
///
/// `is_stable` reports whether the last step was a no-op (a fixed point).
/// Oscillation is not tracked here; see [`crate::patterns::PatternDetector`].
#[derive(Debug, Clone)]
pub struct GameEngine {
    initial: Grid,
    current: Grid,
    previous: Grid,
    generation: u64,
    toroidal: bool,
    stable: bool,
}

impl GameEngine {
    /// Create an engine seeded with a copy of `initial`
    pub fn new(initial: Grid, toroidal: bool) -> Self {
        let previous = blank_like(&initial);
        Self {
            current: initial.clone(),
            initial,
            previous,
            generation: 0,
            toroidal,
            stable: false,
        }
    }

    /// Advance one generation
    pub fn step(&mut self) {
        self.previous.clone_from(&self.current);
        let next = GameOfLifeRules::evolve(&self.current, self.toroidal);

        self.stable = next == self.current;
        self.current = next;
        self.generation += 1;
    }

    /// Restore the seed board and zero the generation counter
    pub fn reset(&mut self) {
        self.current.clone_from(&self.initial);
        self.previous = blank_like(&self.initial);
        self.generation = 0;
        self.stable = false;
        log::debug!("engine reset to initial {}x{} board", self.initial.rows(), self.initial.cols());
    }

    /// Restart the generation count without touching the board
    pub fn reset_generation(&mut self) {
        self.generation = 0;
        self.stable = false;
    }

    /// Swap in a new seed, e.g. after loading a file. Resets the engine.
    pub fn replace_initial(&mut self, initial: Grid) {
        self.initial = initial;
        self.reset();
    }

    /// Replace the current board wholesale (undo/redo, playback).
    ///
    /// Generation and stability flag are left as they are.
    pub fn set_current_grid(&mut self, grid: Grid) -> Result<()> {
        if !grid.same_dimensions(&self.current) {
            return Err(LifeError::InvalidArgument(format!(
                "grid dimensions must match: expected {}x{}, got {}x{}",
                self.current.rows(),
                self.current.cols(),
                grid.rows(),
                grid.cols()
            )));
        }
        self.current = grid;
        Ok(())
    }

    /// Set one cell of the current board, returning its previous state
    pub fn apply_cell_edit(&mut self, row: usize, col: usize, alive: bool) -> Result<bool> {
        let before = self.current.get_cell(row, col)?;
        self.current.set_cell(row, col, alive)?;
        Ok(before)
    }

    /// Flip one cell of the current board, returning its new state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool> {
        self.current.toggle_cell(row, col)
    }

    /// Mutate the current board inside `f`.
    ///
    /// The borrow ends with the closure. If `f` leaves the board with
    /// different dimensions, the edit is rolled back and rejected.
    pub fn edit<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Grid) -> R,
    {
        let snapshot = self.current.clone();
        let out = f(&mut self.current);

        if !self.current.same_dimensions(&snapshot) {
            let (rows, cols) = self.current.dimensions();
            self.current = snapshot;
            return Err(LifeError::InvalidArgument(format!(
                "edit resized the board to {}x{}, expected {}x{}",
                rows,
                cols,
                self.current.rows(),
                self.current.cols()
            )));
        }
        Ok(out)
    }

    pub fn current_grid(&self) -> &Grid {
        &self.current
    }

    pub fn initial_grid(&self) -> &Grid {
        &self.initial
    }

    pub fn previous_grid(&self) -> &Grid {
        &self.previous
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn is_toroidal(&self) -> bool {
        self.toroidal
    }

    pub fn set_toroidal(&mut self, toroidal: bool) {
        self.toroidal = toroidal;
    }
}

fn blank_like(grid: &Grid) -> Grid {
    Grid::from_raw(grid.rows(), grid.cols(), vec![false; grid.rows() * grid.cols()])
}
