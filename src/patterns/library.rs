//! Catalog of named patterns and stamping them into grids

use crate::error::{LifeError, Result};
use crate::game_of_life::{save_grid_to_file, Grid};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// A named rectangle of cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub description: String,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<bool>>,
}

impl Pattern {
    /// Build a pattern, deriving width and height from `cells`
    pub fn new(name: impl Into<String>, description: impl Into<String>, cells: Vec<Vec<bool>>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            height: cells.len(),
            width: cells.first().map_or(0, Vec::len),
            cells,
        }
    }

    fn from_rows(name: &str, description: &str, rows: &[&str]) -> Self {
        let cells = rows
            .iter()
            .map(|row| row.chars().map(|ch| ch == '1').collect())
            .collect();
        Self::new(name, description, cells)
    }

    /// The empty placeholder returned for unknown keys
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn is_well_formed(&self) -> bool {
        self.height == self.cells.len() && self.cells.iter().all(|row| row.len() == self.width)
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    /// The pattern as a standalone grid of exactly its own size
    pub fn to_grid(&self) -> Result<Grid> {
        Grid::from_cells(self.cells.clone())
    }
}

/// Built-in catalog: key, display name, description, rows
const BUILTIN_PATTERNS: &[(&str, &str, &str, &[&str])] = &[
    ("glider", "Glider", "Classic spaceship that travels diagonally", &[
        "010",
        "001",
        "111",
    ]),
    ("blinker", "Blinker", "Period-2 oscillator, simplest pattern", &["111"]),
    ("block", "Block", "Stable 2x2 block, never changes", &["11", "11"]),
    ("toad", "Toad", "Period-2 oscillator", &["0111", "1110"]),
    ("beacon", "Beacon", "Period-2 oscillator with blinking corners", &[
        "1100",
        "1100",
        "0011",
        "0011",
    ]),
    ("pulsar", "Pulsar", "Period-3 oscillator with beautiful symmetry", &[
        "0011100011100",
        "0000000000000",
        "1000010100001",
        "1000010100001",
        "1000010100001",
        "0011100011100",
        "0000000000000",
        "0011100011100",
        "1000010100001",
        "1000010100001",
        "1000010100001",
        "0000000000000",
        "0011100011100",
    ]),
    ("lwss", "Lightweight Spaceship", "Faster spaceship, travels horizontally", &[
        "01001",
        "10000",
        "10001",
        "11110",
    ]),
    ("rpentomino", "R-pentomino", "Chaotic pattern that stabilizes after 1103 generations", &[
        "011",
        "110",
        "010",
    ]),
    ("acorn", "Acorn", "Tiny pattern that runs for 5206 generations", &[
        "0100000",
        "0001000",
        "1100111",
    ]),
    ("gun", "Gosper Glider Gun", "Creates gliders infinitely", &[
        "000000000000000000000000100000000000",
        "000000000000000000000010100000000000",
        "000000000000110000001100000000000011",
        "000000000001000100001100000000000011",
        "110000000010000010001100000000000000",
        "110000000010001011000010100000000000",
        "000000000010000010000000100000000000",
        "000000000001000100000000000000000000",
        "000000000000110000000000000000000000",
    ]),
];

/// Named patterns, keyed by lowercase identifiers such as `"glider"`
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: BTreeMap<String, Pattern>,
    custom: BTreeSet<String>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternLibrary {
    /// A library holding the built-in catalog
    pub fn new() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(key, name, description, rows)| {
                (key.to_string(), Pattern::from_rows(name, description, rows))
            })
            .collect();

        Self {
            patterns,
            custom: BTreeSet::new(),
        }
    }

    /// Look up a pattern, or an empty placeholder if `key` is unknown
    pub fn get_pattern(&self, key: &str) -> Pattern {
        self.patterns.get(key).cloned().unwrap_or_default()
    }

    pub fn pattern(&self, key: &str) -> Option<&Pattern> {
        self.patterns.get(key)
    }

    pub fn has_pattern(&self, key: &str) -> bool {
        self.patterns.contains_key(key)
    }

    /// All keys in sorted order
    pub fn pattern_names(&self) -> Vec<String> {
        self.patterns.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.patterns.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Stamp pattern `key` into `grid` with its top-left at `(row, col)`.
    ///
    /// Both live and dead pattern cells overwrite the target. With
    /// `toroidal`, positions wrap around the grid; otherwise cells landing
    /// outside are skipped. Unknown keys leave the grid untouched and
    /// return `false`.
    pub fn insert_pattern(&self, grid: &mut Grid, key: &str, row: isize, col: isize, toroidal: bool) -> bool {
        let Some(pattern) = self.patterns.get(key) else {
            return false;
        };

        let rows = grid.rows() as isize;
        let cols = grid.cols() as isize;

        for (r, line) in pattern.cells.iter().enumerate() {
            for (c, &alive) in line.iter().enumerate() {
                let mut target_row = row + r as isize;
                let mut target_col = col + c as isize;

                if toroidal {
                    target_row = target_row.rem_euclid(rows);
                    target_col = target_col.rem_euclid(cols);
                }

                if (0..rows).contains(&target_row) && (0..cols).contains(&target_col) {
                    grid.set_unchecked(target_row as usize, target_col as usize, alive);
                }
            }
        }

        true
    }

    /// Stamp pattern `key` so that it sits centered on `grid`
    pub fn insert_centered(&self, grid: &mut Grid, key: &str, toroidal: bool) -> bool {
        let Some(pattern) = self.patterns.get(key) else {
            return false;
        };
        let row = (grid.rows() as isize - pattern.height as isize) / 2;
        let col = (grid.cols() as isize - pattern.width as isize) / 2;
        self.insert_pattern(grid, key, row, col, toroidal)
    }

    /// Capture the inclusive rectangle `(start_row, start_col)..=(end_row, end_col)`
    /// of `grid` as pattern `key`, replacing any entry already stored there.
    ///
    /// Inverted rectangles or ones reaching past the grid are ignored and
    /// return `false`.
    #[allow(clippy::too_many_arguments)]
    pub fn save_pattern(
        &mut self,
        key: &str,
        description: &str,
        grid: &Grid,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> bool {
        if start_row > end_row || start_col > end_col {
            return false;
        }
        if end_row >= grid.rows() || end_col >= grid.cols() {
            return false;
        }

        let cells: Vec<Vec<bool>> = (start_row..=end_row)
            .map(|r| {
                (start_col..=end_col)
                    .map(|c| grid.get_cell(r, c).unwrap_or(false))
                    .collect()
            })
            .collect();

        log::debug!(
            "captured pattern '{}' ({}x{})",
            key,
            end_row - start_row + 1,
            end_col - start_col + 1
        );
        self.store(key.to_string(), Pattern::new(key, description, cells));
        true
    }

    /// Delete an entry if present
    pub fn remove_pattern(&mut self, key: &str) {
        self.patterns.remove(key);
        self.custom.remove(key);
    }

    fn store(&mut self, key: String, pattern: Pattern) {
        self.custom.insert(key.clone());
        self.patterns.insert(key, pattern);
    }

    /// Write every captured or imported entry as JSON, returning how many
    pub fn export_custom<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let custom: BTreeMap<&str, &Pattern> = self
            .custom
            .iter()
            .filter_map(|key| self.patterns.get(key).map(|p| (key.as_str(), p)))
            .collect();

        let json = serde_json::to_string_pretty(&custom)
            .map_err(|e| LifeError::Format(format!("failed to serialize patterns: {}", e)))?;
        std::fs::write(path, json).map_err(|source| LifeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(custom.len())
    }

    /// Merge entries from a JSON file written by [`Self::export_custom`]
    pub fn import<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LifeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: BTreeMap<String, Pattern> = serde_json::from_str(&content)
            .map_err(|e| LifeError::Format(format!("invalid pattern file {}: {}", path.display(), e)))?;

        if let Some((key, _)) = entries.iter().find(|(_, p)| !p.is_well_formed()) {
            return Err(LifeError::Format(format!(
                "pattern '{}' dimensions do not match its cells",
                key
            )));
        }

        let count = entries.len();
        for (key, pattern) in entries {
            self.store(key, pattern);
        }
        Ok(count)
    }

    /// Save each entry as `<key>.txt` in the grid file format
    pub fn write_pattern_files<P: AsRef<Path>>(&self, dir: P) -> Result<usize> {
        let dir = dir.as_ref();
        let mut written = 0;

        for (key, pattern) in &self.patterns {
            if pattern.is_empty() {
                continue;
            }
            save_grid_to_file(&pattern.to_grid()?, dir.join(format!("{}.txt", key)))?;
            written += 1;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{load_grid_from_file, CellParsing, GameOfLifeRules};
    use tempfile::tempdir;

    #[test]
    fn test_builtin_catalog() {
        let library = PatternLibrary::new();
        let keys = [
            "acorn", "beacon", "blinker", "block", "glider", "gun", "lwss", "pulsar", "rpentomino", "toad",
        ];
        assert_eq!(library.pattern_names(), keys);

        for key in keys {
            let pattern = library.get_pattern(key);
            assert!(pattern.is_well_formed(), "{} is ragged", key);
            assert!(!pattern.is_empty());
        }

        let gun = library.get_pattern("gun");
        assert_eq!((gun.width, gun.height), (36, 9));
        assert_eq!(gun.population(), 36);
        assert_eq!(library.get_pattern("pulsar").population(), 48);
        assert_eq!(library.get_pattern("glider").population(), 5);
        assert_eq!(library.get_pattern("lwss").name, "Lightweight Spaceship");
    }

    #[test]
    fn test_builtin_behaviors() {
        let library = PatternLibrary::new();

        let mut board = Grid::new(12, 12).unwrap();
        library.insert_pattern(&mut board, "beacon", 4, 4, false);
        let twice = GameOfLifeRules::evolve_generations(board.clone(), 2, false);
        assert_eq!(twice, board);
        assert_ne!(GameOfLifeRules::evolve(&board, false), board);

        let mut pulsar = Grid::new(17, 17).unwrap();
        library.insert_centered(&mut pulsar, "pulsar", false);
        assert_eq!(GameOfLifeRules::evolve_generations(pulsar.clone(), 3, false), pulsar);
    }

    #[test]
    fn test_unknown_key() {
        let library = PatternLibrary::new();
        let pattern = library.get_pattern("spaceship");
        assert!(pattern.is_empty());
        assert_eq!((pattern.width, pattern.height), (0, 0));
        assert!(!library.has_pattern("spaceship"));

        let mut grid = Grid::from_rows(&["010", "101"]).unwrap();
        let before = grid.clone();
        assert!(!library.insert_pattern(&mut grid, "spaceship", 0, 0, false));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_insert_clips_on_planar_grid() {
        let library = PatternLibrary::new();
        let mut grid = Grid::new(5, 5).unwrap();

        assert!(library.insert_pattern(&mut grid, "block", 4, 4, false));
        assert_eq!(grid.living_cells(), vec![(4, 4)]);

        let mut grid = Grid::new(5, 5).unwrap();
        library.insert_pattern(&mut grid, "block", -1, -1, false);
        assert_eq!(grid.living_cells(), vec![(0, 0)]);
    }

    #[test]
    fn test_insert_larger_than_grid_keeps_overlap_only() {
        let library = PatternLibrary::new();
        let gun = library.get_pattern("gun");
        let mut grid = Grid::new(4, 6).unwrap();

        // Pattern starts above-left of the grid and runs off the far edges
        assert!(library.insert_pattern(&mut grid, "gun", -2, -10, false));

        for row in 0..4 {
            for col in 0..6 {
                assert_eq!(grid.get_cell(row, col).unwrap(), gun.cells[row + 2][col + 10]);
            }
        }
    }

    #[test]
    fn test_insert_wraps_on_torus() {
        let library = PatternLibrary::new();
        let mut grid = Grid::new(5, 5).unwrap();

        library.insert_pattern(&mut grid, "block", 4, 4, true);
        assert_eq!(grid.living_cells(), vec![(0, 0), (0, 4), (4, 0), (4, 4)]);
    }

    #[test]
    fn test_insert_overwrites_with_dead_cells() {
        let library = PatternLibrary::new();
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_cell(0, 0, true).unwrap();

        library.insert_pattern(&mut grid, "glider", 0, 0, false);
        assert!(!grid.get_cell(0, 0).unwrap());
        assert_eq!(grid.count_living(), 5);
    }

    #[test]
    fn test_save_and_remove_pattern() {
        let mut library = PatternLibrary::new();
        let grid = Grid::from_rows(&["0000", "0110", "0100", "0000"]).unwrap();

        assert!(library.save_pattern("corner", "three cells", &grid, 1, 1, 2, 2));
        let saved = library.get_pattern("corner");
        assert_eq!((saved.width, saved.height), (2, 2));
        assert_eq!(saved.cells, vec![vec![true, true], vec![true, false]]);
        assert_eq!(saved.name, "corner");

        // Inverted or out-of-bounds rectangles are ignored
        assert!(!library.save_pattern("bad", "", &grid, 2, 0, 1, 3));
        assert!(!library.save_pattern("bad", "", &grid, 0, 0, 4, 1));
        assert!(!library.has_pattern("bad"));

        // Replacing keeps one entry under the key
        assert!(library.save_pattern("corner", "one cell", &grid, 1, 1, 1, 1));
        assert_eq!(library.get_pattern("corner").description, "one cell");

        library.remove_pattern("corner");
        library.remove_pattern("corner");
        assert!(!library.has_pattern("corner"));
    }

    #[test]
    fn test_export_and_import() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("custom.json");

        let mut library = PatternLibrary::new();
        let grid = Grid::from_rows(&["11", "10"]).unwrap();
        library.save_pattern("ell", "corner piece", &grid, 0, 0, 1, 1);
        assert_eq!(library.export_custom(&path).unwrap(), 1);

        let mut other = PatternLibrary::new();
        assert_eq!(other.import(&path).unwrap(), 1);
        assert_eq!(other.get_pattern("ell"), library.get_pattern("ell"));

        std::fs::write(&path, r#"{"bad": {"name": "bad", "description": "", "width": 3, "height": 1, "cells": [[true]]}}"#).unwrap();
        assert!(matches!(other.import(&path), Err(LifeError::Format(_))));
    }

    #[test]
    fn test_write_pattern_files() {
        let temp_dir = tempdir().unwrap();
        let library = PatternLibrary::new();
        assert_eq!(library.write_pattern_files(temp_dir.path()).unwrap(), 10);

        let glider = load_grid_from_file(temp_dir.path().join("glider.txt"), CellParsing::Strict).unwrap();
        assert_eq!(glider, library.get_pattern("glider").to_grid().unwrap());
    }
}
