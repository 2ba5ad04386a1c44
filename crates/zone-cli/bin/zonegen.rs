//! Zone maze generator
//!
//! Generates one maze and prints it to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zone_cli::{OutputFormat, render};
use zone_core::{MazeConfig, Zone, ZoneRng};

/// Generate a zone maze
#[derive(Parser, Debug)]
#[command(name = "zonegen")]
#[command(author, version, about = "Generate a procedural zone maze", long_about = None)]
struct Args {
    /// Zone width in tiles
    #[arg(short = 'W', long, default_value_t = 41)]
    width: usize,

    /// Zone height in tiles
    #[arg(short = 'H', long, default_value_t = 21)]
    height: usize,

    /// Seed string; the same seed always gives the same maze
    #[arg(short, long, default_value = "zone")]
    seed: String,

    /// Settings file of `key = value` lines
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chance a corridor junction becomes a door
    #[arg(long)]
    door_prob: Option<f64>,

    /// Chance a door starts open
    #[arg(long)]
    door_open_prob: Option<f64>,

    /// Chance a growing room stays on the front (branching)
    #[arg(long)]
    seed_prob: Option<f64>,

    /// Chance an already-carved room is joined again (loops)
    #[arg(long)]
    connect_prob: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn maze_config(&self) -> Result<MazeConfig> {
        let mut config = match &self.config {
            Some(path) => MazeConfig::load_from_file(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => MazeConfig::default(),
        };

        if let Some(p) = self.door_prob {
            config.door_prob = p;
        }
        if let Some(p) = self.door_open_prob {
            config.door_open_prob = p;
        }
        if let Some(p) = self.seed_prob {
            config.seed_prob = p;
        }
        if let Some(p) = self.connect_prob {
            config.connect_prob = p;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.maze_config()?;
    let mut zone = Zone::new(args.width, args.height);
    let mut rng = ZoneRng::from_seed_str(&args.seed);
    let stats = zone.create_maze(&config, &mut rng);
    info!(
        width = zone.width(),
        height = zone.height(),
        seed = %args.seed,
        doors = stats.doors_placed,
        capped = stats.capped,
        "zone_generated"
    );

    let out = render(&zone, args.format, &args.seed, stats)?;
    io::stdout()
        .lock()
        .write_all(out.as_bytes())
        .context("writing maze")?;
    Ok(())
}
