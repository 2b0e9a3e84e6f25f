//! Display and output formatting utilities

use crate::game_of_life::Grid;
use crate::patterns::{Pattern, PatternLibrary};
use crate::session::{PopulationStats, TickReport};

/// Console rendering of boards and run summaries
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() * 3 + 1));
        for row in grid.cells().chunks(grid.cols()) {
            output.extend(row.iter().map(|&alive| if alive { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (row, cells) in grid.cells().chunks(grid.cols()).enumerate() {
            output.push_str(&format!("{:2} ", row));
            for &alive in cells {
                output.push_str(if alive { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line status for a generation
    pub fn format_tick(report: &TickReport) -> String {
        let mut line = format!(
            "Gen {:>5} | Pop {:>6} | {}",
            report.generation, report.population, report.pattern_name
        );
        if report.engine_stable {
            line.push_str(" | fixed point");
        }
        if report.paused {
            line.push_str(" | paused");
        }
        line
    }

    /// Multi-line statistics block
    pub fn format_stats(stats: &PopulationStats) -> String {
        let min = stats
            .min_population
            .map_or_else(|| "-".to_string(), |m| m.to_string());

        format!(
            "Generation: {}\nPopulation: {}\nBirths: {}\nDeaths: {}\nMax Pop: {}\nMin Pop: {}\nAvg Pop: {:.1}\n",
            stats.generation,
            stats.population,
            stats.births,
            stats.deaths,
            stats.max_population,
            min,
            stats.average_population
        )
    }

    /// Table of library entries, optionally with their cells drawn
    pub fn format_library(library: &PatternLibrary, show_cells: bool) -> String {
        let mut output = String::new();
        output.push_str("Key        | Size  | Name                   | Description\n");
        output.push_str("-----------|-------|------------------------|------------------------------\n");

        for (key, pattern) in library.iter() {
            output.push_str(&format!(
                "{:10} | {:>5} | {:22} | {}\n",
                key,
                format!("{}x{}", pattern.width, pattern.height),
                pattern.name,
                pattern.description
            ));
            if show_cells {
                output.push_str(&Self::format_pattern(pattern));
                output.push('\n');
            }
        }

        output
    }

    fn format_pattern(pattern: &Pattern) -> String {
        pattern
            .cells
            .iter()
            .map(|row| row.iter().map(|&c| if c { '█' } else { '·' }).collect::<String>() + "\n")
            .collect()
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
