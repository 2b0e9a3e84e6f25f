//! Configuration management for simulation runs

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, Settings, SimulationConfig, MIN_STEP_MS,
};
