//! Error types for the simulation core

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by grid, engine and file operations.
#[derive(Debug, Error)]
pub enum LifeError {
    /// A constructor or setter received an unusable value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A cell position fell outside the grid.
    #[error("cell ({row}, {col}) out of range for {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A grid file could not be opened or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A grid file was malformed or truncated.
    #[error("format error: {0}")]
    Format(String),
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;
