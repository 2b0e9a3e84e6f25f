//! Game of Life core functionality

pub mod engine;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::GameEngine;
pub use grid::Grid;
pub use io::{load_grid_from_file, parse_grid_from_string, save_grid_to_file, CellParsing};
pub use rules::GameOfLifeRules;
