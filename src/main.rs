//! # Hexgen Command Line
//!
//! Generates a hex map from a preset or JSON config and prints it, its JSON
//! form, or an analysis report.

use clap::{Parser, ValueEnum};
use hexgen::{GenerationConfig, HexMapGenerator, HexgenResult, MapAnalyzer};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Built-in configuration presets.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    Balanced,
    ResourceRich,
    Challenging,
    Exploration,
    Combat,
}

impl Preset {
    fn config(self, seed: u64) -> GenerationConfig {
        match self {
            Preset::Default => GenerationConfig::new(seed),
            Preset::Balanced => GenerationConfig::balanced(seed),
            Preset::ResourceRich => GenerationConfig::resource_rich(seed),
            Preset::Challenging => GenerationConfig::challenging(seed),
            Preset::Exploration => GenerationConfig::exploration(seed),
            Preset::Combat => GenerationConfig::combat(seed),
        }
    }
}

/// Command line arguments for the map generator.
#[derive(Parser, Debug)]
#[command(name = "hexgen")]
#[command(about = "Deterministic procedural hex map generator")]
#[command(version)]
struct Args {
    /// JSON configuration file (overrides --preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in preset to start from
    #[arg(short, long, value_enum, default_value = "default")]
    preset: Preset,

    /// Random seed (0 picks a fresh one)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map radius (1 to 10)
    #[arg(short, long)]
    radius: Option<i32>,

    /// Number of objectives
    #[arg(short, long)]
    objectives: Option<u32>,

    /// Print the analysis report
    #[arg(long)]
    analyze: bool,

    /// Print the map as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting hexgen v{}", hexgen::VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initializes logging, letting `RUST_LOG` win over the command line.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn load_config(args: &Args) -> HexgenResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GenerationConfig::from_json_file(path)?
        }
        None => args.preset.config(0),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(radius) = args.radius {
        config.radius = radius;
    }
    if let Some(objectives) = args.objectives {
        config.objective_count = objectives;
    }

    Ok(config)
}

fn run(args: &Args) -> HexgenResult<()> {
    let config = load_config(args)?;
    let generated = HexMapGenerator::new().generate_map(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&generated.map)?);
    } else {
        print!("{}", generated.map.render_text());
        println!(
            "seed {} | {} tiles | {} objectives | {} warnings",
            generated.seed,
            generated.map.len(),
            generated.summary.objectives_placed,
            generated.report.warnings().count()
        );
    }

    if args.analyze {
        let report = MapAnalyzer::new().analyze(&generated.map);
        report.log_report();
        print!("{}", report);
    }

    Ok(())
}
