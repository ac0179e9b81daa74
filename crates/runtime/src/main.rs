//! Headless realm simulator.
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use realm_content::{ConfigLoader, MapLoader};
use realm_core::RealmConfig;
use realm_runtime::{IdleBrain, MeanderBrain, Runtime};

#[derive(Debug, Parser)]
#[command(name = "realm-sim", about = "Run a seeded realm simulation")]
struct Args {
    /// Realm configuration (TOML). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map layout listing blocked tiles (TOML).
    #[arg(long)]
    map: Option<PathBuf>,

    /// Maximum number of ticks to run.
    #[arg(long, default_value_t = 1024)]
    ticks: u64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write one JSON snapshot per tick to this file.
    #[arg(long)]
    snapshots: Option<PathBuf>,

    /// Keep NPCs still instead of wandering.
    #[arg(long)]
    idle_npcs: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load(path)?,
        None => RealmConfig::default(),
    };

    let mut builder = Runtime::builder(config.clone()).seed(args.seed);
    if let Some(path) = &args.map {
        builder = builder.map(MapLoader::load(path, &config.map)?);
    }
    builder = if args.idle_npcs {
        builder.npc_brain(IdleBrain)
    } else {
        builder.npc_brain(MeanderBrain::default())
    };
    if let Some(path) = &args.snapshots {
        let file = File::create(path)
            .with_context(|| format!("Failed to create snapshot file {}", path.display()))?;
        builder = builder.recorder(BufWriter::new(file));
    }

    let mut runtime = builder.build()?;
    let summary = runtime.run(args.ticks)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
