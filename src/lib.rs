//! Conway's Game of Life simulation engine
//!
//! This library provides a bounds-checked grid, a generation-stepping engine
//! with planar or toroidal edges, a detector that classifies long-term
//! behavior, and a catalog of classic patterns.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod patterns;
pub mod session;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, Result};
pub use game_of_life::{GameEngine, Grid};
pub use patterns::{PatternDetector, PatternLibrary, PatternType};
pub use session::LifeSession;

use rand::Rng;

/// Build the starting board described by `settings`: the configured grid
/// file if there is one, otherwise a blank board with optional random fill
/// and a library pattern stamped at its center.
pub fn build_seed<R: Rng + ?Sized>(settings: &Settings, library: &PatternLibrary, rng: &mut R) -> anyhow::Result<Grid> {
    use anyhow::Context;

    if let Some(ref path) = settings.input.grid_file {
        return game_of_life::load_grid_from_file(path, settings.input.loader)
            .with_context(|| format!("Failed to load grid from {}", path.display()));
    }

    let mut grid = Grid::new(settings.simulation.rows, settings.simulation.cols)?;
    if let Some(density) = settings.input.random_density {
        grid.randomize(density, rng)?;
    }
    if let Some(ref key) = settings.input.pattern {
        if !library.insert_centered(&mut grid, key, settings.simulation.toroidal) {
            anyhow::bail!("Unknown pattern '{}'", key);
        }
    }
    Ok(grid)
}
