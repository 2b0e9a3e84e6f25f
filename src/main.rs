//! Command-line front end for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use conway_life::{
    build_seed,
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{load_grid_from_file, save_grid_to_file, CellParsing},
    session::{LifeSession, SessionOptions, TickReport},
    utils::{ColorOutput, GridFormatter},
    PatternLibrary, PatternType,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "conway_life")]
#[command(about = "Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation in the console
    Run(RunArgs),

    /// Create a default configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// List the pattern library
    Patterns {
        /// Draw each pattern's cells
        #[arg(long)]
        show: bool,
    },

    /// Run a grid file without pacing and report how it behaves
    Analyze {
        /// Grid file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Generations to simulate
        #[arg(short, long, default_value_t = 100)]
        generations: u64,

        /// Wrap the board edges
        #[arg(long)]
        toroidal: bool,

        /// Accept any integer cell value, nonzero meaning alive
        #[arg(long)]
        lenient: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Grid file to load (overrides config)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Library pattern to place on a generated board (overrides config)
    #[arg(short, long)]
    pattern: Option<String>,

    /// Random fill density for a generated board
    #[arg(long)]
    density: Option<f64>,

    /// Accept any integer cell value, nonzero meaning alive
    #[arg(long)]
    lenient: bool,

    /// Wrap the board edges (overrides config)
    #[arg(long)]
    toroidal: Option<bool>,

    /// Generations to run, 0 for until the board settles (overrides config)
    #[arg(short, long)]
    generations: Option<u64>,

    /// Milliseconds between generations (overrides config)
    #[arg(long)]
    step_ms: Option<u64>,

    /// Do not wait between generations
    #[arg(long)]
    fast: bool,

    /// Print the board after every generation
    #[arg(long)]
    show_frames: bool,

    /// Save the final board to this file
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Print the run as JSON
    #[arg(long, conflicts_with = "quiet")]
    json: bool,

    /// Only print the final summary
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", e)));
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run_command(args),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Patterns { show } => patterns_command(show),
        Commands::Analyze {
            file,
            generations,
            toroidal,
            lenient,
        } => analyze_command(file, generations, toroidal, lenient),
    }
}

fn run_command(args: RunArgs) -> Result<()> {
    // Load configuration
    let mut settings = if args.config.exists() {
        Settings::from_file(&args.config)
            .with_context(|| format!("Failed to load config from {}", args.config.display()))?
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
        Settings::default()
    };

    let format = if args.json {
        Some(OutputFormat::Json)
    } else if args.quiet {
        Some(OutputFormat::Quiet)
    } else {
        None
    };

    // Apply CLI overrides
    settings.merge_with_cli(&CliOverrides {
        grid_file: args.file.clone(),
        pattern: args.pattern.clone(),
        random_density: args.density,
        lenient: args.lenient,
        toroidal: args.toroidal,
        step_ms: args.step_ms,
        generations: args.generations,
        save_final: args.save.clone(),
        format,
    });
    settings.validate().context("Configuration validation failed")?;

    if settings.simulation.max_generations == 0 && !settings.simulation.auto_pause_on_stable {
        anyhow::bail!("An unbounded run needs auto_pause_on_stable enabled");
    }

    let library = PatternLibrary::new();
    let seed = build_seed(&settings, &library, &mut rand::thread_rng())?;
    let output = settings.output.format;

    log::info!(
        "Starting {}x{} {} board",
        seed.rows(),
        seed.cols(),
        if settings.simulation.toroidal { "toroidal" } else { "planar" }
    );

    if args.verbose && output == OutputFormat::Text {
        println!("Configuration:");
        println!("  Board: {}x{}", seed.rows(), seed.cols());
        println!("  Toroidal: {}", settings.simulation.toroidal);
        println!("  Step: {} ms", settings.simulation.step_ms);
        println!("  Max generations: {}", settings.simulation.max_generations);
        println!();
    }

    let mut session = LifeSession::new(seed, settings.simulation.toroidal, settings.session_options());
    if output == OutputFormat::Text && args.show_frames {
        println!("{}", ColorOutput::info("Generation 0:"));
        println!("{}", GridFormatter::format_grid_compact(session.grid()));
    }

    let pace = (!args.fast).then(|| Duration::from_millis(settings.simulation.step_ms));
    let max_generations = settings.simulation.max_generations;
    let start_time = Instant::now();
    let mut reports: Vec<TickReport> = Vec::new();

    while max_generations == 0 || session.engine().generation() < max_generations {
        let Some(report) = session.advance() else {
            break;
        };

        if output == OutputFormat::Text {
            println!("{}", GridFormatter::format_tick(&report));
            if args.show_frames {
                println!("{}", GridFormatter::format_grid_compact(session.grid()));
            }
        }

        let extinct = report.pattern == PatternType::Extinct;
        reports.push(report);
        if extinct {
            break;
        }

        if let Some(pace) = pace {
            std::thread::sleep(pace);
        }
    }

    let elapsed = start_time.elapsed();
    log::info!(
        "Ran {} generations in {:.3}s",
        session.engine().generation(),
        elapsed.as_secs_f64()
    );

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json_summary(&session, &reports))?);
        }
        OutputFormat::Text | OutputFormat::Quiet => print_summary(&session),
    }

    if let Some(ref path) = settings.output.save_final {
        save_grid_to_file(session.grid(), path)
            .with_context(|| format!("Failed to save final board to {}", path.display()))?;
        if output != OutputFormat::Json {
            println!("{}", ColorOutput::success(&format!("Final board saved to {}", path.display())));
        }
    }

    Ok(())
}

fn json_summary(session: &LifeSession, reports: &[TickReport]) -> serde_json::Value {
    serde_json::json!({
        "generations": session.engine().generation(),
        "pattern": session.detector().pattern_type(),
        "description": session.detector().pattern_description(),
        "stats": session.stats(),
        "final_board": session.grid(),
        "ticks": reports,
    })
}

fn print_summary(session: &LifeSession) {
    let detector = session.detector();
    let headline = format!(
        "Generation {}: {}",
        session.engine().generation(),
        detector.pattern_name()
    );

    if detector.is_stable() {
        println!("\n{}", ColorOutput::success(&headline));
    } else if detector.pattern_type() == PatternType::Extinct {
        println!("\n{}", ColorOutput::warning(&headline));
    } else {
        println!("\n{}", ColorOutput::info(&headline));
    }
    println!("{}", detector.pattern_description());
    println!();
    print!("{}", GridFormatter::format_stats(session.stats()));
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Toroidal variant seeded with the glider gun
    let mut gun_config = Settings::default();
    gun_config.simulation.rows = 40;
    gun_config.simulation.cols = 60;
    gun_config.simulation.toroidal = true;
    gun_config.simulation.auto_pause_on_stable = false;
    gun_config.input.pattern = Some("gun".to_string());
    gun_config.to_file(&config_dir.join("gun.yaml"))?;

    let written = PatternLibrary::new()
        .write_pattern_files(&patterns_dir)
        .context("Failed to write pattern files")?;
    println!("Created {} pattern files in: {}", written, patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: conway_life run --file {}", patterns_dir.join("glider.txt").display());

    Ok(())
}

fn patterns_command(show: bool) -> Result<()> {
    let library = PatternLibrary::new();
    println!("{}", ColorOutput::info(&format!("{} patterns:", library.pattern_names().len())));
    print!("{}", GridFormatter::format_library(&library, show));
    Ok(())
}

fn analyze_command(file: PathBuf, generations: u64, toroidal: bool, lenient: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Analyzing board..."));

    let parsing = if lenient { CellParsing::Lenient } else { CellParsing::Strict };
    let grid = load_grid_from_file(&file, parsing)
        .with_context(|| format!("Failed to load grid from {}", file.display()))?;

    println!("Board ({}x{}):", grid.rows(), grid.cols());
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    println!("  Living cells: {}", grid.count_living());
    println!("  Density: {:.1}%", grid.density() * 100.0);

    let options = SessionOptions {
        auto_pause_on_stable: false,
        ..SessionOptions::default()
    };
    let mut session = LifeSession::new(grid, toroidal, options);

    let mut first_stable = None;
    for _ in 0..generations {
        let report = session.step();
        if first_stable.is_none() && session.detector().is_stable() {
            first_stable = Some(report.generation);
        }
        if report.pattern == PatternType::Extinct {
            break;
        }
    }

    print_summary(&session);
    match first_stable {
        Some(generation) => println!("Settled at generation {}", generation),
        None => println!("Did not settle within {} generations", generations),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway_life::Grid;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "conway_life",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
            "--toroidal",
            "true",
        ]);
        assert!(cli.is_ok());

        let conflicting = Cli::try_parse_from(["conway_life", "run", "--json", "--quiet"]);
        assert!(conflicting.is_err());

        let analyze = Cli::try_parse_from(["conway_life", "analyze", "--file", "g.txt"]);
        assert!(analyze.is_ok());
    }

    #[test]
    fn test_json_summary_includes_final_board() {
        let grid = Grid::from_rows(&["0000", "0110", "0110", "0000"]).unwrap();
        let mut session = LifeSession::new(grid, false, SessionOptions::default());
        let reports = vec![session.step(), session.step()];

        let summary = json_summary(&session, &reports);
        assert_eq!(summary["generations"], 2);
        assert_eq!(summary["pattern"], "still_life");
        assert_eq!(summary["final_board"]["rows"], 4);
        assert_eq!(summary["final_board"]["cols"], 4);
        assert_eq!(summary["final_board"]["cells"][5], true);
        assert_eq!(summary["final_board"]["cells"][0], false);
        assert_eq!(summary["ticks"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/gun.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());
    }

    #[test]
    fn test_run_command_saves_final_board() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("blinker.txt");
        let output = temp_dir.path().join("out/final.txt");

        let mut grid = Grid::new(5, 5).unwrap();
        for col in 1..4 {
            grid.set_cell(2, col, true).unwrap();
        }
        save_grid_to_file(&grid, &input).unwrap();

        let cli = Cli::try_parse_from([
            "conway_life",
            "run",
            "--config",
            temp_dir.path().join("missing.yaml").to_str().unwrap(),
            "--file",
            input.to_str().unwrap(),
            "--generations",
            "1",
            "--fast",
            "--quiet",
            "--save",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        run_command(args).unwrap();

        let saved = load_grid_from_file(&output, CellParsing::Strict).unwrap();
        assert_eq!(saved.living_cells(), vec![(1, 2), (2, 2), (3, 2)]);
    }
}
