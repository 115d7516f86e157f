use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terrain_core::{
    ColorMode, StartLocation, Terrain, TerrainConfig, TerrainGenerator, TerrainKind, save_png,
    to_le_bytes,
};

/// Procedural heightmap generator.
#[derive(Parser)]
#[command(name = "terrain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a heightmap and save it as a PNG.
    Generate(GenerateArgs),
    /// List the available generators.
    Kinds,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Generation algorithm.
    #[arg(short, long, value_enum, default_value = "square-diamond")]
    kind: KindArg,

    /// Grid size is 2^n + 1.
    #[arg(short, long, default_value = "8", value_parser = clap::value_parser!(u32).range(1..=12))]
    exponent: u32,

    /// Grid size, overriding --exponent. Must be a power of 2 plus 1.
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generator settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where particle deposition starts.
    #[arg(long, value_enum)]
    start: Option<StartArg>,

    /// Particle count for the deposition generators.
    #[arg(long)]
    iterations: Option<usize>,

    /// Output PNG file.
    #[arg(short, long, default_value = "terrain.png")]
    output: PathBuf,

    /// Pixel coloring.
    #[arg(long, value_enum, default_value = "gray")]
    color: ColorArg,

    /// Also write raw little-endian f32 heights to this file.
    #[arg(long)]
    raw: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Particle,
    RollDown,
    StepFault,
    Bump,
    SquareDiamond,
}

impl From<KindArg> for TerrainKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Particle => TerrainKind::ParticleDeposition,
            KindArg::RollDown => TerrainKind::RollDown,
            KindArg::StepFault => TerrainKind::StepFault,
            KindArg::Bump => TerrainKind::Bump,
            KindArg::SquareDiamond => TerrainKind::SquareDiamond,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StartArg {
    Center,
    Random,
}

impl From<StartArg> for StartLocation {
    fn from(start: StartArg) -> Self {
        match start {
            StartArg::Center => StartLocation::Center,
            StartArg::Random => StartLocation::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorArg {
    Gray,
    Terrain,
}

impl From<ColorArg> for ColorMode {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Gray => ColorMode::Gray,
            ColorArg::Terrain => ColorMode::Terrain,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<TerrainConfig> {
    let Some(path) = path else {
        return Ok(TerrainConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

// Settings from the config file, with command line flags on top
fn resolve_config(args: &GenerateArgs) -> Result<TerrainConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(start) = args.start {
        config.particle.start = start.into();
    }
    if let Some(iterations) = args.iterations {
        config.particle.iterations = iterations;
    }
    Ok(config)
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let dimension = args.dimension.unwrap_or((1 << args.exponent) + 1);
    let kind = TerrainKind::from(args.kind);
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen_range(0..u64::MAX));

    info!("generating {} terrain: {}x{}, seed {}", kind, dimension, dimension, seed);
    let start = Instant::now();

    let rng = ChaCha8Rng::seed_from_u64(seed);
    let mut terrain = Terrain::new(kind, dimension, &config, rng)
        .with_context(|| format!("cannot build {} generator", kind))?;
    terrain
        .generate()
        .with_context(|| format!("{} generation failed", kind))?;
    let grid = terrain.into_grid();

    let (lo, hi) = grid.min_max();
    info!(
        "generated in {:.2} ms, heights in [{:.4}, {:.4}]",
        start.elapsed().as_secs_f32() * 1000.0,
        lo,
        hi
    );

    save_png(&grid, &args.output, args.color.into())
        .with_context(|| format!("failed to save {}", args.output.display()))?;
    info!("saved {}", args.output.display());

    if let Some(raw) = &args.raw {
        fs::write(raw, to_le_bytes(&grid))
            .with_context(|| format!("failed to write {}", raw.display()))?;
        info!("saved raw heights to {}", raw.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Kinds => {
            for kind in TerrainKind::ALL {
                println!("{:<16} {}", kind.name(), kind.description());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        match cli.command {
            Commands::Generate(args) => args,
            Commands::Kinds => panic!("expected generate"),
        }
    }

    #[test]
    fn cli_defaults() {
        let args = parse(&["terrain", "generate"]);
        assert_eq!(args.kind, KindArg::SquareDiamond);
        assert_eq!(args.exponent, 8);
        assert_eq!(args.output, PathBuf::from("terrain.png"));
        assert_eq!(args.color, ColorArg::Gray);
    }

    #[test]
    fn cli_kind_names_match_core() {
        for kind in TerrainKind::ALL {
            let args = parse(&["terrain", "generate", "--kind", kind.name()]);
            assert_eq!(TerrainKind::from(args.kind), kind);
        }
    }

    #[test]
    fn cli_overrides_config() {
        let args = parse(&[
            "terrain",
            "generate",
            "--kind",
            "particle",
            "--start",
            "random",
            "--iterations",
            "42",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.particle.start, StartLocation::Random);
        assert_eq!(config.particle.iterations, 42);
        assert_eq!(config.fault.fault_count, 300);
    }

    #[test]
    fn cli_rejects_large_exponent() {
        assert!(Cli::try_parse_from(["terrain", "generate", "--exponent", "20"]).is_err());
    }
}
