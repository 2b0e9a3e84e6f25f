//! Conway's B3/S23 transition rule

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Apply the rule to every cell at once, producing the next generation.
    ///
    /// Rows are computed in parallel; the result is identical to a
    /// sequential sweep.
    pub fn evolve(current: &Grid, toroidal: bool) -> Grid {
        let cols = current.cols();

        let next_cells: Vec<bool> = current
            .cells()
            .par_chunks(cols)
            .enumerate()
            .flat_map_iter(|(row, cells)| {
                cells.iter().enumerate().map(move |(col, &alive)| {
                    let neighbors = current.neighbors_unchecked(row, col, toroidal);
                    Self::should_be_alive(alive, neighbors)
                })
            })
            .collect();

        Grid::from_raw(current.rows(), cols, next_cells)
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize, toroidal: bool) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid, toroidal);
        }
        grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}
