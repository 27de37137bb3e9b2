use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{EngineConfig, Run};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the level's generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Level number; later levels use scaled settings
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    /// Print a JSON snapshot instead of the ASCII map
    #[arg(long)]
    json: bool,
    /// TOML engine config; falls back to DUNGEON_CONFIG, then defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = EngineConfig::resolve(args.config.as_deref()).context("Failed to load config")?;
    let run = Run::starting_at(args.seed, args.level.max(1), config)
        .with_context(|| format!("Failed to generate level {} of seed {}", args.level, args.seed))?;
    let level = run.level();

    if args.json {
        let json = serde_json::to_string_pretty(&level.snapshot())
            .context("Failed to serialize snapshot")?;
        println!("{json}");
        return Ok(());
    }

    println!("Seed {} level {}", args.seed, level.number());
    print!("{}", level.render_ascii());
    println!(
        "Rooms: {}  Enemies: {}  Chests: {}",
        level.rooms().len(),
        level.enemies().len(),
        level.chests().len()
    );
    println!("Player: {:?}  Exit: {:?}", level.player().being.pos, level.exit().pos);
    Ok(())
}
