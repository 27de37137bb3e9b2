use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use dungeon_core::{Command, Direction, EngineConfig, Run, TickOutcome};
use log::info;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Seed for the random command stream; defaults to the map seed
    #[arg(long)]
    command_seed: Option<u64>,
    #[arg(short, long, default_value_t = 5000)]
    ticks: u32,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
struct Summary {
    ticks: u32,
    level: u32,
    outcome: TickOutcome,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn next_command(rng: &mut ChaCha8Rng, slots: usize) -> Option<Command> {
    // Idle most ticks so animations and enemy cadence get a chance to run
    if rng.next_u64() % 3 != 0 {
        return None;
    }
    let slot = rng.next_u64() as usize % slots.max(1);
    let command = choose(
        rng,
        &[
            Command::Move(Direction::North),
            Command::Move(Direction::East),
            Command::Move(Direction::South),
            Command::Move(Direction::West),
            Command::Move(Direction::East),
            Command::Move(Direction::South),
            Command::Interact,
            Command::Interact,
            Command::UseItem,
            Command::DropItem,
            Command::SelectSlot(slot),
        ],
    );
    Some(command)
}

fn simulate(seed: u64, command_seed: u64, ticks: u32, config: EngineConfig) -> Result<Summary> {
    let tick_ms = config.tick_interval_ms;
    let slots = config.player.inventory_slots;
    let mut run = Run::new(seed, config).context("Failed to start run")?;
    let mut rng = ChaCha8Rng::seed_from_u64(command_seed);

    let mut outcome = TickOutcome::Continue;
    let mut tick = 0;
    while tick < ticks {
        let command = next_command(&mut rng, slots);
        outcome = run
            .tick(command, tick_ms)
            .with_context(|| format!("Level generation failed at tick {tick}"))?;
        tick += 1;

        let level = run.level();
        if let Err(err) = level.verify_occupancy() {
            bail!("Invariant failed on seed {seed} at tick {tick}: {err}");
        }
        for (_, enemy) in level.enemies() {
            if level.grid().blocks_path(enemy.being.pos) {
                bail!("Invariant failed on seed {seed}: enemy in wall at {:?}", enemy.being.pos);
            }
        }
        if outcome == TickOutcome::GameOver {
            break;
        }
    }

    Ok(Summary { ticks: tick, level: run.level_number(), outcome })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = EngineConfig::resolve(args.config.as_deref()).context("Failed to load config")?;
    let command_seed = args.command_seed.unwrap_or(args.seed);

    info!("simulating seed {} for up to {} ticks", args.seed, args.ticks);
    let summary = simulate(args.seed, command_seed, args.ticks, config)?;
    println!(
        "Simulation finished after {} ticks on level {} with outcome {:?}",
        summary.ticks, summary.level, summary.outcome
    );
    Ok(())
}
