#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a maze and drives an explorer.

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use maze_forage_core::{GridDim, ResourceAllocation};
use maze_forage_system_dfs::{Dfs, StepOutcome};
use maze_forage_system_least_traveled::LeastTraveled;
use maze_forage_world::{MazeBuilder, PlayerInterface};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generates a fog-of-war maze and explores it with a traversal strategy.
#[derive(Debug, Parser)]
#[command(name = "maze-forage")]
struct Args {
    /// Grid width in tiles.
    #[arg(long, default_value_t = 25)]
    width: u32,
    /// Grid height in tiles.
    #[arg(long, default_value_t = 19)]
    height: u32,
    /// Total resource stockpile to embed in the maze.
    #[arg(long, default_value_t = 40)]
    stockpile: u32,
    /// Minimum resource amount drawn per site.
    #[arg(long, default_value_t = 1)]
    min: u32,
    /// Maximum resource amount drawn per site.
    #[arg(long, default_value_t = 5)]
    max: u32,
    /// Seed for the random source; equal seeds replay identical runs.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Step budget for the explorer.
    #[arg(long, default_value_t = 500)]
    steps: u64,
    /// Traversal strategy to drive.
    #[arg(long, value_enum, default_value_t = Strategy::Dfs)]
    strategy: Strategy,
    /// Write the finished terrain as headerless JSON rows of booleans.
    #[arg(long)]
    dump: Option<PathBuf>,
    /// Write the construction trace as JSON for animation playback.
    #[arg(long)]
    dump_trace: Option<PathBuf>,
}

/// Selectable traversal strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Depth-first search with backtracking.
    Dfs,
    /// Randomized least-traveled walk.
    LeastTraveled,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let dim = GridDim::new(args.width, args.height);
    let allocation = ResourceAllocation::new(args.stockpile, args.min, args.max);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let builder =
        MazeBuilder::generate(dim, allocation, &mut rng).context("maze generation failed")?;
    println!(
        "generated {}x{} maze: {} walkable tiles, {} resource sites, start {}",
        args.width,
        args.height,
        builder.terrain().walkable_count(),
        builder.resources().site_count(),
        builder.player_start()
    );

    if let Some(path) = &args.dump {
        fs::write(path, builder.terrain().to_json())
            .with_context(|| format!("writing terrain to {}", path.display()))?;
    }
    if let Some(path) = &args.dump_trace {
        let json = serde_json::to_string(builder.trace()).context("serializing trace")?;
        fs::write(path, json)
            .with_context(|| format!("writing trace to {}", path.display()))?;
    }

    let interface = PlayerInterface::new(builder);
    match args.strategy {
        Strategy::Dfs => run_dfs(interface, args.steps),
        Strategy::LeastTraveled => run_least_traveled(interface, rng, args.steps),
    }
}

fn run_dfs(mut interface: PlayerInterface, budget: u64) -> anyhow::Result<()> {
    let mut agent = Dfs::new(&interface);
    let mut taken = 0u64;
    for _ in 0..budget {
        match agent.step(&mut interface)? {
            StepOutcome::Moved(_) => taken += 1,
            StepOutcome::Done => {
                println!("dfs: exploration complete after {taken} steps");
                break;
            }
        }
    }
    println!(
        "dfs: {taken} steps, {} tiles visited, {} tiles discovered",
        agent.visited_count(),
        agent.known().discovered_count()
    );
    Ok(())
}

fn run_least_traveled(
    mut interface: PlayerInterface,
    rng: ChaCha8Rng,
    budget: u64,
) -> anyhow::Result<()> {
    let mut agent = LeastTraveled::new(&interface, rng);
    for _ in 0..budget {
        let _ = agent.step(&mut interface)?;
    }
    println!(
        "least-traveled: {budget} steps, {} tiles visited, {} tiles discovered",
        agent.visited_count(),
        agent.known().discovered_count()
    );
    Ok(())
}
