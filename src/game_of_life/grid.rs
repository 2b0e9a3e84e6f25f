//! Grid representation and utilities for Game of Life

use crate::error::{LifeError, Result};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A fixed-size board of live/dead cells, stored row-major.
///
/// Dimensions only change through [`Grid::load_from_file`], which swaps in a
/// whole new board at once. Cloning produces an independent deep copy, so
/// snapshots held by history buffers never see later edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }

        let len = rows.checked_mul(cols).ok_or_else(|| {
            LifeError::InvalidArgument(format!("grid dimensions {}x{} are too large", rows, cols))
        })?;

        Ok(Self {
            rows,
            cols,
            cells: vec![false; len],
        })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        if cells.is_empty() {
            return Err(LifeError::InvalidArgument("grid cannot be empty".into()));
        }

        let rows = cells.len();
        let cols = cells[0].len();

        if cols == 0 {
            return Err(LifeError::InvalidArgument("grid width cannot be zero".into()));
        }

        // Verify all rows have the same length
        for (i, row) in cells.iter().enumerate() {
            if row.len() != cols {
                return Err(LifeError::InvalidArgument(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
        }

        Ok(Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Create a grid from text rows where `'1'` is alive and `'0'` is dead
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let cells = rows
            .iter()
            .enumerate()
            .map(|(r, line)| {
                line.chars()
                    .enumerate()
                    .map(|(c, ch)| match ch {
                        '1' => Ok(true),
                        '0' => Ok(false),
                        other => Err(LifeError::InvalidArgument(format!(
                            "invalid cell character '{}' at ({}, {})",
                            other, r, c
                        ))),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_cells(cells)
    }

    /// Assemble a grid from an already-validated flat buffer
    pub(crate) fn from_raw(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.dimensions() == other.dimensions()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.index(row, col))
    }

    /// Get cell value at coordinates
    pub fn get_cell(&self, row: usize, col: usize) -> Result<bool> {
        let idx = self.checked_index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Set cell value at coordinates
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Set a cell the caller has already bounds-checked
    pub(crate) fn set_unchecked(&mut self, row: usize, col: usize, alive: bool) {
        debug_assert!(row < self.rows && col < self.cols);
        let idx = self.index(row, col);
        self.cells[idx] = alive;
    }

    /// Flip a cell, returning its new state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Count living cells in the Moore neighborhood of `(row, col)`.
    ///
    /// With `toroidal` set, neighbor coordinates wrap around both axes;
    /// otherwise cells beyond the edge count as dead.
    pub fn count_neighbors(&self, row: usize, col: usize, toroidal: bool) -> Result<u8> {
        self.checked_index(row, col)?;
        Ok(self.neighbors_unchecked(row, col, toroidal))
    }

    /// Neighbor count for a position already known to be in bounds
    pub(crate) fn neighbors_unchecked(&self, row: usize, col: usize, toroidal: bool) -> u8 {
        let mut count = 0;

        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let r = row as isize + dr;
                let c = col as isize + dc;

                if self.is_neighbor_alive(r, c, toroidal) {
                    count += 1;
                }
            }
        }

        count
    }

    fn is_neighbor_alive(&self, row: isize, col: isize, toroidal: bool) -> bool {
        let rows = self.rows as isize;
        let cols = self.cols as isize;

        if toroidal {
            let wrapped_row = row.rem_euclid(rows) as usize;
            let wrapped_col = col.rem_euclid(cols) as usize;
            self.cells[self.index(wrapped_row, wrapped_col)]
        } else if (0..rows).contains(&row) && (0..cols).contains(&col) {
            self.cells[self.index(row as usize, col as usize)]
        } else {
            false
        }
    }

    /// Kill every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Flip every cell
    pub fn invert(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = !*cell);
    }

    /// Fill the board at random, each cell alive with probability `density`
    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::InvalidArgument(format!(
                "density must be within 0.0..=1.0, got {}",
                density
            )));
        }

        for cell in self.cells.iter_mut() {
            *cell = rng.gen_range(0.0..1.0) < density;
        }
        Ok(())
    }

    /// Count total living cells
    pub fn count_living(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.cols, idx % self.cols))
            .collect()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Fraction of cells alive
    pub fn density(&self) -> f64 {
        self.count_living() as f64 / self.cells.len() as f64
    }

    /// Row-major `'0'`/`'1'` string with no separators
    pub fn canonical_string(&self) -> String {
        self.cells.iter().map(|&c| if c { '1' } else { '0' }).collect()
    }

    pub(crate) fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Replace this grid with the one stored at `path` (strict format).
    ///
    /// Dimensions and contents are swapped in together; on error the grid
    /// is left as it was.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = super::io::load_grid_from_file(path, super::io::CellParsing::Strict)?;
        Ok(())
    }

    /// Write this grid in the `rows cols` header + 0/1 token format
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        super::io::save_grid_to_file(self, path)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", if cell { '█' } else { '.' })?;
            }
        }
        Ok(())
    }
}
