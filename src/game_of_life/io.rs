//! File I/O operations for Game of Life grids
//!
//! Format: the first line holds `rows cols`, followed by `rows` lines of
//! `cols` space-separated cell tokens (`0` dead, `1` alive).

use super::Grid;
use crate::error::{LifeError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How cell tokens are interpreted when reading a grid file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellParsing {
    /// Only `0` and `1` are accepted
    #[default]
    Strict,
    /// Any integer is accepted, nonzero meaning alive
    Lenient,
}

/// Load a grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P, parsing: CellParsing) -> Result<Grid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LifeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_grid_from_string(&content, parsing)
}

/// Parse a grid from its text representation
pub fn parse_grid_from_string(content: &str, parsing: CellParsing) -> Result<Grid> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .ok_or_else(|| LifeError::Format("missing dimension header".into()))?;

    let (rows, cols) = parse_header(header)?;
    let total = rows
        .checked_mul(cols)
        .ok_or_else(|| LifeError::Format(format!("grid dimensions {}x{} are too large", rows, cols)))?;

    // Nothing sized by the header is allocated until the data is complete
    let mut cells = Vec::new();
    for token in lines.flat_map(str::split_whitespace).take(total) {
        let index = cells.len();
        cells.push(parse_cell(token, parsing, index / cols, index % cols)?);
    }

    if cells.len() < total {
        return Err(LifeError::Format(format!(
            "not enough cell values: expected {}, data ends at ({}, {})",
            total,
            cells.len() / cols,
            cells.len() % cols
        )));
    }

    Ok(Grid::from_raw(rows, cols, cells))
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let dims: Vec<i64> = header
        .split_whitespace()
        .map(|t| t.parse::<i64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| LifeError::Format(format!("invalid dimension header '{}'", header.trim())))?;

    match dims.as_slice() {
        [rows, cols] if *rows > 0 && *cols > 0 => Ok((*rows as usize, *cols as usize)),
        [rows, cols] => Err(LifeError::Format(format!(
            "invalid dimensions in file: {}x{}",
            rows, cols
        ))),
        _ => Err(LifeError::Format(format!(
            "expected 'rows cols' on the first line, found '{}'",
            header.trim()
        ))),
    }
}

fn parse_cell(token: &str, parsing: CellParsing, row: usize, col: usize) -> Result<bool> {
    match parsing {
        CellParsing::Strict => match token {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(LifeError::Format(format!(
                "invalid cell value '{}' at ({}, {}), must be 0 or 1",
                other, row, col
            ))),
        },
        CellParsing::Lenient => token.parse::<i64>().map(|v| v != 0).map_err(|_| {
            LifeError::Format(format!("invalid cell value '{}' at ({}, {})", token, row, col))
        }),
    }
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| LifeError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    std::fs::write(path, grid_to_string(grid)).map_err(io_err)
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = format!("{} {}\n", grid.rows(), grid.cols());

    for row in grid.cells().chunks(grid.cols()) {
        result.push_str(&row.iter().map(|&c| if c { "1" } else { "0" }).join(" "));
        result.push('\n');
    }

    result
}
