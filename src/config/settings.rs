//! Configuration settings for simulation runs

use crate::game_of_life::CellParsing;
use crate::session::SessionOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shortest tick interval accepted, in milliseconds
pub const MIN_STEP_MS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Board size used when no grid file is given
    pub rows: usize,
    pub cols: usize,
    pub toroidal: bool,
    pub step_ms: u64,
    /// Generations to run headless; 0 runs until the board settles
    pub max_generations: u64,
    pub auto_pause_on_stable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub grid_file: Option<PathBuf>,
    pub loader: CellParsing,
    /// Library pattern placed at the center of a generated board
    pub pattern: Option<String>,
    /// Random fill density for a generated board, applied before `pattern`
    pub random_density: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_final: Option<PathBuf>,
    pub history_size: usize,
    pub timeline_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Quiet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                rows: 80,
                cols: 80,
                toroidal: false,
                step_ms: 200,
                max_generations: 200,
                auto_pause_on_stable: true,
            },
            input: InputConfig {
                grid_file: None,
                loader: CellParsing::Strict,
                pattern: Some("glider".to_string()),
                random_density: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_final: None,
                history_size: 50,
                timeline_size: 1000,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.rows == 0 || self.simulation.cols == 0 {
            anyhow::bail!(
                "Board dimensions must be positive, got {}x{}",
                self.simulation.rows,
                self.simulation.cols
            );
        }

        if self.simulation.step_ms < MIN_STEP_MS {
            anyhow::bail!("step_ms must be at least {}", MIN_STEP_MS);
        }

        if let Some(density) = self.input.random_density {
            if !(0.0..=1.0).contains(&density) {
                anyhow::bail!("random_density must be within 0.0..=1.0, got {}", density);
            }
        }

        if let Some(ref file) = self.input.grid_file {
            if !file.exists() {
                anyhow::bail!("Grid file does not exist: {}", file.display());
            }
        }

        if self.output.history_size == 0 || self.output.timeline_size == 0 {
            anyhow::bail!("history_size and timeline_size must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref grid_file) = cli_overrides.grid_file {
            self.input.grid_file = Some(grid_file.clone());
        }
        if let Some(ref pattern) = cli_overrides.pattern {
            self.input.pattern = Some(pattern.clone());
        }
        if let Some(density) = cli_overrides.random_density {
            self.input.random_density = Some(density);
        }
        if cli_overrides.lenient {
            self.input.loader = CellParsing::Lenient;
        }
        if let Some(toroidal) = cli_overrides.toroidal {
            self.simulation.toroidal = toroidal;
        }
        if let Some(step_ms) = cli_overrides.step_ms {
            self.simulation.step_ms = step_ms;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.max_generations = generations;
        }
        if let Some(ref save_final) = cli_overrides.save_final {
            self.output.save_final = Some(save_final.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            history_size: self.output.history_size,
            timeline_size: self.output.timeline_size,
            auto_pause_on_stable: self.simulation.auto_pause_on_stable,
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub grid_file: Option<PathBuf>,
    pub pattern: Option<String>,
    pub random_density: Option<f64>,
    pub lenient: bool,
    pub toroidal: Option<bool>,
    pub step_ms: Option<u64>,
    pub generations: Option<u64>,
    pub save_final: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}
